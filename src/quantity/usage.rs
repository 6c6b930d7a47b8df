use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, rate::UnitRate};

/// Metered quantity in the meter's own unit (kWh, m³, …).
pub type Usage = Quantity<1, 0, 0>;

impl Display for Usage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Debug for Usage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}u", self.0)
    }
}

impl Mul<UnitRate> for Usage {
    type Output = Cost;

    fn mul(self, rhs: UnitRate) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}
