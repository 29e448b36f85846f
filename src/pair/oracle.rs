//! Cumulative price observations and time-weighted averages.
//!
//! Every reserve update first adds `price · elapsed` to each of the two
//! accumulators, using the reserves as they stood *before* the update.
//! Prices are [`Uq112x112`] values; the accumulators are plain 256-bit
//! words that wrap on overflow.  Two observations taken at different
//! times give the time-weighted average price over the interval:
//!
//! ```text
//! twap = (cumulative_later − cumulative_earlier) / (t_later − t_earlier)
//! ```
//!
//! Both subtractions wrap, so the average stays correct across one
//! accumulator overflow and one 32-bit timestamp wrap.

use primitive_types::U256;

use super::ReservePair;
use crate::domain::{Amount, Timestamp};
use crate::error::{AmmError, Result};
use crate::math::Uq112x112;

/// Truncates a caller-supplied timestamp to the 32 bits a pool stores.
#[inline]
#[must_use]
pub const fn block_timestamp(now: Timestamp) -> u32 {
    // modulo 2^32
    now as u32
}

/// Adds `(numerator / denominator) · elapsed` to `cumulative`, wrapping.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub(crate) fn accumulate(
    cumulative: U256,
    numerator: Amount,
    denominator: Amount,
    elapsed: u32,
) -> Result<U256> {
    let price = Uq112x112::ratio(numerator.get(), denominator.get())?;
    let (delta, _) = price.to_bits().overflowing_mul(U256::from(elapsed));
    let (next, _) = cumulative.overflowing_add(delta);
    Ok(next)
}

/// A snapshot of a pool's price accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Observation {
    /// Pool time of the snapshot, truncated to 32 bits.
    pub timestamp: u32,
    /// Cumulative price of `x` in units of `y`.
    pub price_x_cumulative: U256,
    /// Cumulative price of `y` in units of `x`.
    pub price_y_cumulative: U256,
}

impl Observation {
    /// Time-weighted average prices between `earlier` and `self`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if both observations carry
    /// the same timestamp.
    pub fn average_since(&self, earlier: &Self) -> Result<AveragePrices> {
        let elapsed = self.timestamp.wrapping_sub(earlier.timestamp);
        if elapsed == 0 {
            return Err(AmmError::DivisionByZero);
        }
        let elapsed = U256::from(elapsed);
        let (dx, _) = self
            .price_x_cumulative
            .overflowing_sub(earlier.price_x_cumulative);
        let (dy, _) = self
            .price_y_cumulative
            .overflowing_sub(earlier.price_y_cumulative);
        Ok(AveragePrices {
            price_x: Uq112x112::from_bits(dx / elapsed),
            price_y: Uq112x112::from_bits(dy / elapsed),
        })
    }
}

/// Average prices over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AveragePrices {
    /// Average price of `x` in units of `y`.
    pub price_x: Uq112x112,
    /// Average price of `y` in units of `x`.
    pub price_y: Uq112x112,
}

impl AveragePrices {
    /// Values `amount_x` of the `x` asset in units of `y`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result does not fit.
    pub fn consult_x(&self, amount_x: Amount) -> Result<Amount> {
        self.price_x.mul_truncate(amount_x.get()).map(Amount::new)
    }

    /// Values `amount_y` of the `y` asset in units of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result does not fit.
    pub fn consult_y(&self, amount_y: Amount) -> Result<Amount> {
        self.price_y.mul_truncate(amount_y.get()).map(Amount::new)
    }
}

impl ReservePair {
    /// Accumulators as they would read if the pool were synced at `now`.
    ///
    /// Saves consumers a `sync` call: the time since the last update is
    /// credited at the current reserves without touching the pool.
    ///
    /// # Errors
    ///
    /// Propagates fixed-point errors; none occur for a pool whose
    /// reserves are both non-zero or both zero.
    pub fn observe(&self, now: Timestamp) -> Result<Observation> {
        let (reserve_x, reserve_y, last) = self.reserves();
        let timestamp = block_timestamp(now);
        let mut price_x_cumulative = self.price_x_cumulative();
        let mut price_y_cumulative = self.price_y_cumulative();
        let elapsed = timestamp.wrapping_sub(last);
        if elapsed > 0 && !reserve_x.is_zero() && !reserve_y.is_zero() {
            price_x_cumulative = accumulate(price_x_cumulative, reserve_y, reserve_x, elapsed)?;
            price_y_cumulative = accumulate(price_y_cumulative, reserve_x, reserve_y, elapsed)?;
        }
        Ok(Observation {
            timestamp,
            price_x_cumulative,
            price_y_cumulative,
        })
    }
}
