//! Catalog prices.
//!
//! Prices are euro amounts carried as `f64`. Cart totals are plain
//! floating-point sums of `price * qty`; nothing in the domain rounds. The
//! only rounding happens when a price is rendered with [`Price::display`] or
//! [`format_euros`], which use fixed two-decimal formatting.
//!
//! Known precision caveat: sums such as `0.1 + 0.2` carry binary
//! floating-point error. Stored carts written by earlier clients hold the
//! same binary values, so totals stay comparable across versions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative euro amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Zero euros.
    pub const ZERO: Self = Self(0.0);

    /// Create a price from an amount in euros.
    ///
    /// Negative and non-finite amounts are clamped to zero.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self(amount)
        } else {
            Self::ZERO
        }
    }

    /// The raw amount in euros.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Format for display (e.g. `"71.98 €"`).
    #[must_use]
    pub fn display(self) -> String {
        format_euros(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

/// Render any euro amount with two decimals and the euro sign.
#[must_use]
pub fn format_euros(amount: f64) -> String {
    format!("{amount:.2} €")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::new(71.98).display(), "71.98 €");
        assert_eq!(Price::new(249.0).display(), "249.00 €");
        assert_eq!(Price::new(17.1).to_string(), "17.10 €");
    }

    #[test]
    fn test_negative_clamped() {
        assert_eq!(Price::new(-3.0), Price::ZERO);
        assert_eq!(Price::new(f64::NAN), Price::ZERO);
    }

    #[test]
    fn test_format_euros_rounds_only_at_display() {
        let sum: f64 = 0.1 + 0.2;
        assert!((sum - 0.3).abs() > 0.0);
        assert_eq!(format_euros(sum), "0.30 €");
    }
}
