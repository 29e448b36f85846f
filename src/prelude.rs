//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pairswap::prelude::*;
//! ```
//!
//! Brings in the domain types, the collaborator traits, configuration,
//! the registry, the pair engine, the router and its parameter types, the
//! in-memory ledgers, and the error types.

pub use crate::domain::{
    Address, Amount, AssetPair, FeeRate, Rounding, Shares, SwapPath, Timestamp,
};

pub use crate::traits::{AssetBook, FlashSwap, FungibleAsset, SwapCallee};

pub use crate::txn::Checkpoint;

pub use crate::math::CheckedArithmetic;

pub use crate::config::{PairConfig, RegistryConfig, MINIMUM_LIQUIDITY};

pub use crate::error::{AmmError, Result};

pub use crate::factory::PairRegistry;

pub use crate::pair::{ReservePair, SwapRequest};

pub use crate::router::{
    AddLiquidity, ExactInput, ExactOutput, LiquidityAdded, LiquidityRemoved, RemoveLiquidity,
    Router,
};

pub use crate::ledger::{AssetBank, PoolShareLedger, TokenLedger};
