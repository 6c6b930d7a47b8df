pub mod cost;
pub mod rate;
pub mod usage;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Dimension-tagged `f64`.
///
/// The exponents track the meter unit (kWh, m³, …), days and the tariff currency,
/// so that, for example, usage times a unit rate can only produce a cost.
#[must_use]
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<const USAGE: isize, const TIME: isize, const COST: isize>(pub f64);

impl<const USAGE: isize, const TIME: isize, const COST: isize> Quantity<USAGE, TIME, COST> {
    pub const ZERO: Self = Self(0.0);
}

impl<const USAGE: isize, const TIME: isize, const COST: isize> Mul<f64>
    for Quantity<USAGE, TIME, COST>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const USAGE: isize, const TIME: isize, const COST: isize> Div<f64>
    for Quantity<USAGE, TIME, COST>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::{Debug, Formatter};

    use approx::assert_abs_diff_eq;

    use super::*;

    type Bare = Quantity<0, 0, 0>;

    impl Debug for Bare {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    #[test]
    fn test_sum() {
        let total: Bare = [Bare::from(1.5), Bare::from(2.0), Bare::from(-0.5)].into_iter().sum();
        assert_abs_diff_eq!(total.0, 3.0);
    }

    #[test]
    fn test_scalar_ops() {
        assert_abs_diff_eq!((Bare::from(3.0) * 2.0).0, 6.0);
        assert_abs_diff_eq!((Bare::from(3.0) / 2.0).0, 1.5);
    }

    #[test]
    fn test_serializes_as_plain_number() -> crate::prelude::Result {
        assert_eq!(serde_json::to_string(&Bare::from(0.25))?, "0.25");
        assert_eq!(serde_json::from_str::<Bare>("1.5")?, Bare::from(1.5));
        Ok(())
    }
}
