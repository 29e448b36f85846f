//! The constant-product pair engine.
//!
//! [`ReservePair`] is the only component that mutates reserves and share
//! balances.  [`oracle`] reads its price accumulators.

pub mod oracle;
mod reserve_pair;
mod swap_request;

#[cfg(test)]
mod proptest_properties;

pub use oracle::{AveragePrices, Observation};
pub use reserve_pair::{PairState, ReservePair};
pub use swap_request::SwapRequest;
