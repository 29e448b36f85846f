//! 256-bit intermediates for reserve and share arithmetic.
//!
//! Reserves are bounded by 2^112, so a product of two reserves, or a
//! reserve scaled by a fee denominator squared, needs more than 128 bits.
//! These helpers do that work in [`U256`] and narrow back to `u128` with
//! a checked conversion.

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Lifts a `u128` into 256 bits.
#[inline]
#[must_use]
pub fn widen(v: u128) -> U256 {
    U256::from(v)
}

/// Full product of two `u128` values.
///
/// Cannot overflow: both factors are below 2^128.
#[inline]
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Checked 256-bit multiplication.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` on overflow.
#[inline]
pub fn checked_mul(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(AmmError::ArithmeticOverflow(context))
}

/// Checked 256-bit subtraction.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` on underflow.
#[inline]
pub fn checked_sub(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_sub(b).ok_or(AmmError::ArithmeticOverflow(context))
}

/// Narrows a 256-bit value to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` if `v` does not
/// fit in 128 bits.
#[inline]
pub fn narrow(v: U256, context: &'static str) -> Result<u128> {
    if v.bits() > 128 {
        return Err(AmmError::ArithmeticOverflow(context));
    }
    Ok(v.low_u128())
}

/// Divides in 256 bits with an explicit rounding direction.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `d` is zero.
pub fn div_rounded(n: U256, d: U256, rounding: Rounding) -> Result<U256> {
    if d.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = n.div_mod(d);
    if rounding.is_up() && !r.is_zero() {
        // q < n / 1 <= U256::MAX whenever r != 0
        return Ok(q + U256::one());
    }
    Ok(q)
}

/// Computes `a · b / d` without intermediate overflow.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the quotient exceeds `u128`.
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Result<u128> {
    let q = div_rounded(product(a, b), widen(d), rounding)?;
    narrow(q, "mul_div quotient exceeds u128")
}

/// Returns `true` if `a · b ≥ c · d`, compared in 512 bits.
///
/// The fee-adjusted swap invariant multiplies two values of up to 160
/// bits on each side, which does not fit in 256.
#[must_use]
pub fn product_at_least(a: U256, b: U256, c: U256, d: U256) -> bool {
    a.full_mul(b) >= c.full_mul(d)
}

/// Floor of the square root.
#[inline]
#[must_use]
pub fn isqrt(v: U256) -> U256 {
    v.integer_sqrt()
}
