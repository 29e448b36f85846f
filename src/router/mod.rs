//! Router: slippage-bounded liquidity and multi-hop swaps.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Router`] | Stateless entry points: add/remove liquidity, exact-in and exact-out swaps |
//! | [`library`] | Pure pricing: `quote`, `get_amount_out`, `get_amount_in`, path chaining |
//! | [`AddLiquidity`], [`RemoveLiquidity`], [`ExactInput`], [`ExactOutput`] | Call parameters, each with a deadline |

pub mod library;
mod params;
mod periphery;

pub use params::{
    AddLiquidity, ExactInput, ExactOutput, LiquidityAdded, LiquidityRemoved, RemoveLiquidity,
};
pub use periphery::Router;
