//! Amount type representing a decimal number with a currency.
//!
//! An [`Amount`] pairs a fixed-point decimal with a currency code. It
//! supports arithmetic on references and tolerance-based comparison for
//! balance checking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg};

/// Currency code assumed when the source text names none.
pub const DEFAULT_CURRENCY: &str = "INR";

/// A quantity paired with a currency code.
///
/// # Examples
///
/// ```
/// use recount_core::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount = Amount::new(dec!(100.00), "INR");
/// assert_eq!(amount.number, dec!(100.00));
/// assert_eq!(amount.currency, "INR");
///
/// let other = Amount::new(dec!(50.00), "INR");
/// let sum = &amount + &other;
/// assert_eq!(sum.number, dec!(150.00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// The decimal quantity
    pub number: Decimal,
    /// The currency code (e.g., "INR")
    pub currency: String,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub fn new(number: Decimal, currency: impl Into<String>) -> Self {
        Self {
            number,
            currency: currency.into(),
        }
    }

    /// Create a zero amount with the given currency.
    #[must_use]
    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            number: Decimal::ZERO,
            currency: currency.into(),
        }
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.number.is_zero()
    }

    /// Check if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.number.is_sign_negative()
    }

    /// Get the absolute value of this amount.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            number: self.number.abs(),
            currency: self.currency.clone(),
        }
    }

    /// Check if this amount is near zero within tolerance.
    #[must_use]
    pub fn is_near_zero(&self, tolerance: Decimal) -> bool {
        self.number.abs() <= tolerance
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

impl Add for &Amount {
    type Output = Amount;

    fn add(self, other: &Amount) -> Amount {
        debug_assert_eq!(
            self.currency, other.currency,
            "Cannot add amounts with different currencies"
        );
        Amount {
            number: self.number + other.number,
            currency: self.currency.clone(),
        }
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount {
            number: -self.number,
            currency: self.currency.clone(),
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl AddAssign<&Self> for Amount {
    fn add_assign(&mut self, other: &Self) {
        debug_assert_eq!(
            self.currency, other.currency,
            "Cannot add amounts with different currencies"
        );
        self.number += other.number;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new() {
        let amount = Amount::new(dec!(100.00), "INR");
        assert_eq!(amount.number, dec!(100.00));
        assert_eq!(amount.currency, "INR");
    }

    #[test]
    fn test_zero() {
        let amount = Amount::zero(DEFAULT_CURRENCY);
        assert!(amount.is_zero());
        assert_eq!(amount.currency, "INR");
    }

    #[test]
    fn test_add() {
        let a = Amount::new(dec!(100.00), "INR");
        let b = Amount::new(dec!(50.00), "INR");
        let sum = &a + &b;
        assert_eq!(sum.number, dec!(150.00));
        assert_eq!(sum.currency, "INR");
    }

    #[test]
    fn test_neg() {
        let a = Amount::new(dec!(100.00), "INR");
        let neg_a = -&a;
        assert_eq!(neg_a.number, dec!(-100.00));
        assert!(neg_a.is_negative());
    }

    #[test]
    fn test_add_assign() {
        let mut a = Amount::new(dec!(100.00), "INR");
        let b = Amount::new(dec!(50.00), "INR");
        a += &b;
        assert_eq!(a.number, dec!(150.00));
    }

    #[test]
    fn test_abs() {
        let neg = Amount::new(dec!(-100.00), "INR");
        assert_eq!(neg.abs().number, dec!(100.00));
    }

    #[test]
    fn test_is_near_zero() {
        let a = Amount::new(dec!(0.004), "INR");
        assert!(a.is_near_zero(dec!(0.01)));
        assert!(!a.is_near_zero(dec!(0.003)));
    }

    #[test]
    fn test_display() {
        let a = Amount::new(dec!(1234.56), "INR");
        assert_eq!(format!("{a}"), "1234.56 INR");
    }

    #[test]
    fn test_display_preserves_scale() {
        // "1250" and "1250.00" are distinct renderings; the dedup hash
        // depends on the parsed scale surviving Display.
        assert_eq!(format!("{}", Amount::new(dec!(1250), "INR")), "1250 INR");
        assert_eq!(
            format!("{}", Amount::new(dec!(1250.00), "INR")),
            "1250.00 INR"
        );
    }
}
