//! Unified error types for the pair engine, registry, and router.
//!
//! Every fallible operation in the crate returns [`AmmError`].  A failed
//! mutating call leaves balances, reserves, and share counts exactly as
//! they were before the call began; see [`crate::txn`].

use thiserror::Error;

/// Broad class of an [`AmmError`].
///
/// Useful to callers that decide whether to resubmit with adjusted
/// parameters.  Nothing in this crate retries automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input, rejected before any state is touched.
    Validation,
    /// Economic invariant or arithmetic failure: an attack or a caller
    /// miscalculation.
    Invariant,
    /// The caller is not allowed to perform the operation, or the target
    /// is in a state that forbids it.
    Authorization,
}

/// All error conditions produced by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    // -- validation ---------------------------------------------------------
    /// Both sides of a pair name the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// The null address was used as an asset, or as a sender or owner.
    #[error("zero address")]
    ZeroAddress,

    /// The caller-supplied deadline has passed.
    #[error("deadline expired")]
    Expired,

    /// A swap path has fewer than two assets.
    #[error("invalid path")]
    InvalidPath,

    /// Swap output sent to one of the pair's own asset identifiers.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The asset book has no ledger for the requested asset.
    #[error("unknown asset")]
    UnknownAsset,

    /// No pool is registered under the requested handle or pair.
    #[error("pool not found")]
    PoolNotFound,

    // -- invariant / arithmetic ---------------------------------------------
    /// Checked arithmetic overflowed, or a value exceeded its storage bound.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The fee-adjusted constant-product check failed.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// Reserves cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// No net input reached the pool.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Requested or computed output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// The first deposit does not cover the permanently locked minimum.
    #[error("insufficient initial liquidity")]
    InsufficientInitialLiquidity,

    /// A deposit would mint zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A redemption would pay out zero of one asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Quotation on a zero amount.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// Asset A amount below the caller's minimum.
    #[error("insufficient A amount")]
    InsufficientAAmount,

    /// Asset B amount below the caller's minimum.
    #[error("insufficient B amount")]
    InsufficientBAmount,

    /// Required input exceeds the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// A holder's balance is too small for a transfer or burn.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A spender's allowance is too small for a delegated transfer.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    // -- authorization / state ----------------------------------------------
    /// Caller is not the fee-recipient setter.
    #[error("forbidden")]
    Forbidden,

    /// A pool for this pair already exists.
    #[error("pool exists")]
    PoolExists,

    /// The pool is in the middle of another mutating call.
    #[error("pool locked")]
    Locked,
}

impl AmmError {
    /// Returns the taxonomy class of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::IdenticalAssets
            | Self::ZeroAddress
            | Self::Expired
            | Self::InvalidPath
            | Self::InvalidRecipient
            | Self::InvalidConfiguration(_)
            | Self::UnknownAsset
            | Self::PoolNotFound => ErrorCategory::Validation,
            Self::Forbidden | Self::PoolExists | Self::Locked => ErrorCategory::Authorization,
            _ => ErrorCategory::Invariant,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
