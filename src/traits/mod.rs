//! Collaborator interfaces at the edges of the engine.
//!
//! - [`FungibleAsset`] and [`AssetBook`]: the ledgers pools hold their
//!   reserves in.
//! - [`SwapCallee`]: the flash-swap callback.

mod fungible_asset;
mod swap_callee;

pub use fungible_asset::{AssetBook, FungibleAsset};
pub use swap_callee::{FlashSwap, SwapCallee};
