use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost};

/// Currency per metered unit.
pub type UnitRate = Quantity<-1, 0, 1>;

impl Display for UnitRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Debug for UnitRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/u", self.0)
    }
}

/// Currency per day, the standing charge.
pub type DailyCharge = Quantity<0, -1, 1>;

impl Display for DailyCharge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Debug for DailyCharge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/d", self.0)
    }
}

impl Mul<i64> for DailyCharge {
    type Output = Cost;

    /// Standing charge over the number of days.
    fn mul(self, days: i64) -> Self::Output {
        #[allow(clippy::cast_precision_loss)]
        Cost::from(self.0 * days as f64)
    }
}
