//! Swap fee expressed as a fraction of a fixed denominator.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::wide;

/// A swap fee `numerator / denominator`, charged on the input side only.
///
/// The reference policy is `3 / 1000` (0.30%).  The fee is never
/// transferred anywhere: it stays in the reserves and accrues to share
/// holders (and, through `kLast` dilution, to the protocol).
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, FeeRate};
///
/// let fee = FeeRate::REFERENCE;
/// // floor(100 · 997 / 1000) = 99
/// assert_eq!(fee.apply_complement(Amount::new(100)), Ok(Amount::new(99)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FeeRate {
    numerator: u32,
    denominator: u32,
}

impl FeeRate {
    /// 0.30% on a denominator of 1000.
    pub const REFERENCE: Self = Self {
        numerator: 3,
        denominator: 1_000,
    };

    /// No fee.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1_000,
    };

    /// Creates a fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the denominator is
    /// zero or the fee is 100% or more (no input would ever count).
    pub const fn new(numerator: u32, denominator: u32) -> Result<Self, AmmError> {
        if denominator == 0 {
            return Err(AmmError::InvalidConfiguration(
                "fee denominator must be non-zero",
            ));
        }
        if numerator >= denominator {
            return Err(AmmError::InvalidConfiguration("fee must be below 100%"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Returns the fee numerator.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Returns the fee denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Returns `denominator - numerator`, the share of input that counts.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        self.denominator - self.numerator
    }

    /// Input remaining after the fee: `floor(amount · (den − num) / den)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result does not fit.
    pub fn apply_complement(&self, amount: Amount) -> Result<Amount, AmmError> {
        wide::mul_div(
            amount.get(),
            u128::from(self.complement()),
            u128::from(self.denominator),
            Rounding::Down,
        )
        .map(Amount::new)
    }

    /// Smallest gross input whose fee-discounted value is at least `net`:
    /// `ceil(net · den / (den − num))`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result does not fit.
    pub fn gross_up(&self, net: Amount) -> Result<Amount, AmmError> {
        wide::mul_div(
            net.get(),
            u128::from(self.denominator),
            u128::from(self.complement()),
            Rounding::Up,
        )
        .map(Amount::new)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FeeRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            numerator: u32,
            denominator: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.numerator, raw.denominator).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
