use std::fmt::{Debug, Display, Formatter};

use crate::quantity::cost::Cost;

/// Cost rendered in its currency, rounded to cents.
pub struct Money<'a> {
    pub amount: Cost,
    pub currency: &'a str,
}

impl<'a> Money<'a> {
    pub const fn new(amount: Cost, currency: &'a str) -> Self {
        Self { amount, currency }
    }

    fn symbol(&self) -> Option<&'static str> {
        match self.currency {
            "GBP" => Some("£"),
            "EUR" => Some("€"),
            "USD" => Some("$"),
            _ => None,
        }
    }
}

impl Display for Money<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let amount = self.amount.0;
        match self.symbol() {
            Some(symbol) if amount < 0.0 => write!(f, "-{symbol}{:.2}", -amount),
            Some(symbol) => write!(f, "{symbol}{amount:.2}"),
            None => write!(f, "{amount:.2} {}", self.currency),
        }
    }
}

impl Debug for Money<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_currency() {
        assert_eq!(Money::new(Cost::from(30.5), "GBP").to_string(), "£30.50");
        assert_eq!(Money::new(Cost::from(0.004), "EUR").to_string(), "€0.00");
        assert_eq!(Money::new(Cost::from(-1.234), "USD").to_string(), "-$1.23");
    }

    #[test]
    fn test_other_currency() {
        assert_eq!(Money::new(Cost::from(12.0), "SEK").to_string(), "12.00 SEK");
    }
}
