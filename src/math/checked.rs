//! Checked arithmetic trait for the amount and share newtypes.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning inherent methods of
//! [`Amount`] and [`Shares`] into `Result`s carrying an
//! [`AmmError::ArithmeticOverflow`] context, so engine code can chain them
//! with `?`.
//!
//! # Examples
//!
//! ```
//! use pairswap::domain::Amount;
//! use pairswap::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(1_000);
//! assert_eq!(reserve.safe_add(&Amount::new(100)), Ok(Amount::new(1_100)));
//! assert!(reserve.safe_sub(&Amount::new(1_001)).is_err());
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for the crate's quantity newtypes.
///
/// No method panics or saturates.  Overflow and underflow both surface as
/// [`AmmError::ArithmeticOverflow`]; the payload says which.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticOverflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::DivisionByZero)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("share supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticOverflow("share subtraction underflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        rounding
            .divide(self.get(), other.get())
            .map(Shares::new)
            .ok_or(AmmError::DivisionByZero)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    mod amount {
        use super::*;

        #[test]
        fn add_ok() {
            let Ok(r) = Amount::new(100).safe_add(&Amount::new(200)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(300));
        }

        #[test]
        fn add_overflow() {
            let Err(AmmError::ArithmeticOverflow(_)) = Amount::MAX.safe_add(&Amount::new(1)) else {
                panic!("expected ArithmeticOverflow");
            };
        }

        #[test]
        fn sub_underflow() {
            let Err(AmmError::ArithmeticOverflow(msg)) = Amount::new(1).safe_sub(&Amount::new(2))
            else {
                panic!("expected ArithmeticOverflow");
            };
            assert!(msg.contains("underflow"));
        }

        #[test]
        fn sub_to_zero() {
            let Ok(r) = Amount::new(42).safe_sub(&Amount::new(42)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::ZERO);
        }

        #[test]
        fn div_directions() {
            let Ok(down) = Amount::new(10).safe_div(&Amount::new(3), Rounding::Down) else {
                panic!("expected Ok");
            };
            let Ok(up) = Amount::new(10).safe_div(&Amount::new(3), Rounding::Up) else {
                panic!("expected Ok");
            };
            assert_eq!((down, up), (Amount::new(3), Amount::new(4)));
        }

        #[test]
        fn div_by_zero() {
            let Err(AmmError::DivisionByZero) =
                Amount::new(100).safe_div(&Amount::ZERO, Rounding::Down)
            else {
                panic!("expected DivisionByZero");
            };
        }

        #[test]
        fn chaining_works() {
            // (100 + 200) - 100 = 200, then / 3 rounded up = 67
            let result = Amount::new(100)
                .safe_add(&Amount::new(200))
                .and_then(|v| v.safe_sub(&Amount::new(100)))
                .and_then(|v| v.safe_div(&Amount::new(3), Rounding::Up));
            assert_eq!(result, Ok(Amount::new(67)));
        }
    }

    mod shares {
        use super::*;

        #[test]
        fn add_and_sub() {
            let Ok(r) = Shares::new(1_000).safe_add(&Shares::new(9_000)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Shares::new(10_000));
            assert_eq!(r.safe_sub(&Shares::new(10_000)), Ok(Shares::ZERO));
        }

        #[test]
        fn overflow_and_underflow() {
            assert!(Shares::new(u128::MAX).safe_add(&Shares::new(1)).is_err());
            assert!(Shares::ZERO.safe_sub(&Shares::new(1)).is_err());
        }

        #[test]
        fn div_by_zero() {
            assert_eq!(
                Shares::new(5).safe_div(&Shares::ZERO, Rounding::Up),
                Err(AmmError::DivisionByZero)
            );
            assert_eq!(
                Shares::new(5).safe_div(&Shares::new(2), Rounding::Up),
                Ok(Shares::new(3))
            );
        }
    }
}
