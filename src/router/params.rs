//! Request and result types for [`Router`](super::Router) calls.
//!
//! Every request carries a `deadline`; a call made at `now > deadline`
//! fails with [`AmmError::Expired`](crate::error::AmmError::Expired)
//! before anything else is checked.

use crate::domain::{Address, Amount, Shares, SwapPath, Timestamp};

/// Deposit into the pool of `asset_a` and `asset_b`, creating it if
/// needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddLiquidity {
    pub asset_a: Address,
    pub asset_b: Address,
    /// Most of `asset_a` the caller is willing to deposit.
    pub amount_a_desired: Amount,
    /// Most of `asset_b` the caller is willing to deposit.
    pub amount_b_desired: Amount,
    /// Least of `asset_a` the caller accepts depositing.
    pub amount_a_min: Amount,
    /// Least of `asset_b` the caller accepts depositing.
    pub amount_b_min: Amount,
    /// Receives the minted shares.
    pub to: Address,
    pub deadline: Timestamp,
}

/// Outcome of [`AddLiquidity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityAdded {
    pub pool: Address,
    pub amount_a: Amount,
    pub amount_b: Amount,
    pub shares: Shares,
}

/// Redeem shares of the pool of `asset_a` and `asset_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveLiquidity {
    pub asset_a: Address,
    pub asset_b: Address,
    pub shares: Shares,
    pub amount_a_min: Amount,
    pub amount_b_min: Amount,
    /// Receives both assets.
    pub to: Address,
    pub deadline: Timestamp,
}

/// Outcome of [`RemoveLiquidity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityRemoved {
    pub amount_a: Amount,
    pub amount_b: Amount,
}

/// Sell exactly `amount_in` of `path.first()` for as much of
/// `path.last()` as the pools give, but no less than `amount_out_min`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactInput {
    pub amount_in: Amount,
    pub amount_out_min: Amount,
    pub path: SwapPath,
    pub to: Address,
    pub deadline: Timestamp,
}

/// Buy exactly `amount_out` of `path.last()` for as little of
/// `path.first()` as the pools take, but no more than `amount_in_max`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactOutput {
    pub amount_out: Amount,
    pub amount_in_max: Amount,
    pub path: SwapPath,
    pub to: Address,
    pub deadline: Timestamp,
}
