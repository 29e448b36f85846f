//! Binary fixed-point numbers with 112 fractional bits.
//!
//! Instantaneous pool prices are stored as `reserve_other · 2^112 /
//! reserve_self`.  With reserves bounded by 2^112 the integer part needs
//! at most 112 bits, so a price fits in 224 bits and a price multiplied
//! by a `u32` elapsed-seconds value fits in 256.

use core::fmt;

use primitive_types::U256;

use crate::error::{AmmError, Result};

/// Number of fractional bits.
pub const RESOLUTION: usize = 112;

/// An unsigned fixed-point number, 112 integer and 112 fractional bits,
/// held in a 256-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uq112x112(U256);

impl Uq112x112 {
    /// Zero.
    pub const ZERO: Self = Self(U256::zero());

    /// Wraps raw fixed-point bits.
    #[must_use]
    pub const fn from_bits(bits: U256) -> Self {
        Self(bits)
    }

    /// Returns the raw fixed-point bits.
    #[must_use]
    pub const fn to_bits(&self) -> U256 {
        self.0
    }

    /// Encodes an integer.
    #[must_use]
    pub fn encode(v: u128) -> Self {
        Self(U256::from(v) << RESOLUTION)
    }

    /// Encodes the ratio `numerator / denominator`, rounded down.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
    pub fn ratio(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        Ok(Self(Self::encode(numerator).0 / U256::from(denominator)))
    }

    /// Integer part, rounded down.
    #[must_use]
    pub fn floor(&self) -> U256 {
        self.0 >> RESOLUTION
    }

    /// Multiplies by an integer amount and truncates to an integer.
    ///
    /// This is how an averaged price converts an amount of one asset into
    /// the other.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the product or the
    /// integer result does not fit.
    pub fn mul_truncate(&self, amount: u128) -> Result<u128> {
        let scaled = self
            .0
            .checked_mul(U256::from(amount))
            .ok_or(AmmError::ArithmeticOverflow("fixed-point product overflow"))?;
        super::wide::narrow(scaled >> RESOLUTION, "fixed-point result exceeds u128")
    }

    /// Converts to a 64.64 fixed-point value, dropping 48 fractional bits.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the integer part needs
    /// more than 64 bits.
    #[cfg(feature = "fixed-point")]
    pub fn to_u64f64(&self) -> Result<fixed::types::U64F64> {
        let bits = super::wide::narrow(
            self.0 >> (RESOLUTION - 64),
            "price integer part exceeds 64 bits",
        )?;
        Ok(fixed::types::U64F64::from_bits(bits))
    }
}

impl fmt::Display for Uq112x112 {
    /// Integer part followed by six truncated decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.floor();
        let frac_mask = (U256::one() << RESOLUTION) - U256::one();
        let frac = ((self.0 & frac_mask) * U256::from(1_000_000u32)) >> RESOLUTION;
        write!(f, "{int}.{:06}", frac.low_u32())
    }
}
