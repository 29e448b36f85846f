//! Pool creation and ownership.
//!
//! [`PairRegistry`] creates one [`ReservePair`](crate::pair::ReservePair)
//! per unordered asset pair at a deterministic address (see [`derive`]),
//! keeps them enumerable, and holds the protocol fee switch.

pub mod derive;
mod registry;

pub use derive::{pair_address, TemplateFingerprint};
pub use registry::{PairRegistry, RegistryCheckpoint};
