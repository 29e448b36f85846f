//! Value types shared by the engine, the registry, and the router.
//!
//! All types are newtypes with validated constructors, so an invalid
//! pair, fee, or path cannot reach the engine.

mod address;
mod amount;
mod asset_pair;
mod fee_rate;
mod rounding;
mod shares;
mod swap_path;

pub use address::Address;
pub use amount::Amount;
pub use asset_pair::AssetPair;
pub use fee_rate::FeeRate;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_path::SwapPath;

/// Caller-supplied wall-clock time in seconds.
///
/// Pools store it truncated to `u32` (see
/// [`ReservePair::reserves`](crate::pair::ReservePair::reserves)).
pub type Timestamp = u64;
