//! Raw asset amount with checked arithmetic.

use core::fmt;

use super::Rounding;

/// An asset amount in the asset's smallest unit.
///
/// All `u128` values are representable.  Pool reserves are further bounded
/// by [`ReservePair::MAX_RESERVE`](crate::pair::ReservePair::MAX_RESERVE);
/// amounts in flight (transfers, quotes) are not.
///
/// The arithmetic helpers never panic or wrap; they yield `None` on
/// overflow, underflow, or a zero divisor.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, Rounding};
///
/// let a = Amount::new(1_000);
/// let b = Amount::new(3);
/// assert_eq!(a.checked_div(&b, Rounding::Down), Some(Amount::new(333)));
/// assert_eq!(a.checked_div(&b, Rounding::Up), Some(Amount::new(334)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.  Used as the "unlimited" allowance.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw value in smallest units.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// `true` for the zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum, or `None` past `u128::MAX`.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Difference, or `None` below zero.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtraction floored at zero.
    ///
    /// Used where a negative delta means "nothing arrived", e.g. the
    /// input side of a swap.
    #[must_use]
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Product, or `None` past `u128::MAX`.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Quotient rounded in the given direction.
    ///
    /// Returns `None` if `divisor` is zero.  See [`Rounding::divide`].
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match rounding.divide(self.0, divisor.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_and_accessors() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert!(Amount::default().is_zero());
        assert!(!Amount::new(1).is_zero());
        assert_eq!(Amount::from(7u128), Amount::new(7));
    }

    #[test]
    fn display() {
        assert_eq!(Amount::new(1_099).to_string(), "1099");
    }

    #[test]
    fn add_and_overflow() {
        assert_eq!(
            Amount::new(1_000).checked_add(&Amount::new(99)),
            Some(Amount::new(1_099))
        );
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_and_underflow() {
        assert_eq!(
            Amount::new(1_000).checked_sub(&Amount::new(90)),
            Some(Amount::new(910))
        );
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        assert_eq!(Amount::new(5).saturating_sub(&Amount::new(9)), Amount::ZERO);
        assert_eq!(Amount::new(9).saturating_sub(&Amount::new(5)), Amount::new(4));
    }

    #[test]
    fn mul_and_overflow() {
        assert_eq!(
            Amount::new(100).checked_mul(&Amount::new(997)),
            Some(Amount::new(99_700))
        );
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
    }

    #[test]
    fn div_rounding() {
        let n = Amount::new(99_000);
        let d = Amount::new(1_099);
        assert_eq!(n.checked_div(&d, Rounding::Down), Some(Amount::new(90)));
        assert_eq!(n.checked_div(&d, Rounding::Up), Some(Amount::new(91)));
        assert_eq!(
            Amount::new(10).checked_div(&Amount::new(2), Rounding::Up),
            Some(Amount::new(5))
        );
    }

    #[test]
    fn div_by_zero() {
        assert_eq!(Amount::new(1).checked_div(&Amount::ZERO, Rounding::Down), None);
        assert_eq!(Amount::new(1).checked_div(&Amount::ZERO, Rounding::Up), None);
    }

    #[test]
    fn div_max_round_up() {
        let ceil = Amount::MAX.checked_div(&Amount::new(2), Rounding::Up);
        assert_eq!(ceil, Some(Amount::new(u128::MAX / 2 + 1)));
    }
}
