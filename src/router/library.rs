//! Stateless pricing helpers shared by the router and its callers.
//!
//! # Exact-in (per hop)
//!
//! ```text
//! after_fee  = ⌊amount_in · (den − num) / den⌋
//! amount_out = ⌊after_fee · reserve_out / (reserve_in + after_fee)⌋
//! ```
//!
//! # Exact-out (per hop)
//!
//! The smallest input whose exact-in output is at least `amount_out`:
//!
//! ```text
//! after_fee = ⌈reserve_in · amount_out / (reserve_out − amount_out)⌉
//! amount_in = ⌈after_fee · den / (den − num)⌉
//! ```

use crate::domain::{Address, Amount, AssetPair, FeeRate, Rounding, SwapPath};
use crate::error::{AmmError, Result};
use crate::factory::{pair_address, PairRegistry};
use crate::math::{wide, CheckedArithmetic};

/// Orders two assets canonically.
///
/// # Errors
///
/// - [`AmmError::IdenticalAssets`] if `a == b`.
/// - [`AmmError::ZeroAddress`] if either is null.
pub fn sort_assets(a: Address, b: Address) -> Result<(Address, Address)> {
    let pair = AssetPair::new(a, b)?;
    Ok((pair.first(), pair.second()))
}

/// Derives the handle of the pool for `a` and `b` without a lookup.
///
/// # Errors
///
/// As [`sort_assets`].
pub fn pair_for(registry: &PairRegistry, a: Address, b: Address) -> Result<Address> {
    let assets = AssetPair::new(a, b)?;
    Ok(pair_address(
        registry.address(),
        &registry.template_fingerprint(),
        &assets,
    ))
}

/// Returns `(reserve of a, reserve of b)` for the pool of `a` and `b`.
///
/// # Errors
///
/// - As [`sort_assets`].
/// - [`AmmError::PoolNotFound`] if the pool has not been created.
pub fn reserves_for(registry: &PairRegistry, a: Address, b: Address) -> Result<(Amount, Amount)> {
    registry.pair(pair_for(registry, a, b)?)?.reserves_for(a)
}

/// Amount of `b` worth `amount_a` at the reserve ratio, rounded down.
///
/// # Errors
///
/// - [`AmmError::InsufficientAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Amount;
/// use pairswap::router::library::quote;
///
/// assert_eq!(
///     quote(Amount::new(100), Amount::new(4_000), Amount::new(1_000)),
///     Ok(Amount::new(25))
/// );
/// ```
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    wide::mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), Rounding::Down).map(Amount::new)
}

/// Output of one exact-in hop.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::InsufficientOutputAmount`] if the output rounds to zero.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, FeeRate};
/// use pairswap::router::library::get_amount_out;
///
/// let out = get_amount_out(
///     Amount::new(100),
///     Amount::new(1_000),
///     Amount::new(1_000),
///     FeeRate::REFERENCE,
/// );
/// assert_eq!(out, Ok(Amount::new(90)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let after_fee = fee.apply_complement(amount_in)?;
    let denominator = reserve_in.safe_add(&after_fee)?;
    let amount_out = Amount::new(wide::mul_div(
        after_fee.get(),
        reserve_out.get(),
        denominator.get(),
        Rounding::Down,
    )?);
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    Ok(amount_out)
}

/// Minimal input of one exact-out hop.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` is not below `reserve_out`.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let remaining = reserve_out.safe_sub(&amount_out)?;
    let after_fee = Amount::new(wide::mul_div(
        reserve_in.get(),
        amount_out.get(),
        remaining.get(),
        Rounding::Up,
    )?);
    fee.gross_up(after_fee)
}

/// Chains [`get_amount_out`] along `path`.
///
/// Returns one amount per asset, starting with `amount_in`.
///
/// # Errors
///
/// - [`AmmError::PoolNotFound`] if a hop has no pool.
/// - Any error of [`get_amount_out`].
pub fn get_amounts_out(
    registry: &PairRegistry,
    amount_in: Amount,
    path: &SwapPath,
) -> Result<Vec<Amount>> {
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_in);
    let mut current = amount_in;
    for (input, output) in path.hops() {
        let pair = registry.pair(pair_for(registry, input, output)?)?;
        let (reserve_in, reserve_out) = pair.reserves_for(input)?;
        current = get_amount_out(current, reserve_in, reserve_out, pair.config().swap_fee())?;
        amounts.push(current);
    }
    Ok(amounts)
}

/// Chains [`get_amount_in`] backwards along `path`.
///
/// Returns one amount per asset, ending with `amount_out`.
///
/// # Errors
///
/// - [`AmmError::PoolNotFound`] if a hop has no pool.
/// - Any error of [`get_amount_in`].
pub fn get_amounts_in(
    registry: &PairRegistry,
    amount_out: Amount,
    path: &SwapPath,
) -> Result<Vec<Amount>> {
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_out);
    let mut current = amount_out;
    for (input, output) in path.hops().rev() {
        let pair = registry.pair(pair_for(registry, input, output)?)?;
        let (reserve_in, reserve_out) = pair.reserves_for(input)?;
        current = get_amount_in(current, reserve_in, reserve_out, pair.config().swap_fee())?;
        amounts.push(current);
    }
    amounts.reverse();
    Ok(amounts)
}
