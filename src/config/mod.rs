//! Validated configuration structs.
//!
//! [`PairConfig`] is the blueprint every pool of a registry is stamped
//! from; [`RegistryConfig`] adds the registry's identity and its initial
//! fee-recipient setter.  Loading these from files or the environment is
//! left to the host (enable the `serde` feature).

mod pair;
mod registry;

pub use pair::{PairConfig, MINIMUM_LIQUIDITY, PROTOCOL_FEE_DIVISOR};
pub use registry::RegistryConfig;
