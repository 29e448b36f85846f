//! Arithmetic utilities for reserve, share, and price calculations.
//!
//! - [`CheckedArithmetic`] for overflow-safe operations on the quantity
//!   newtypes.
//! - [`wide`] for 256-bit intermediates (reserve products, the
//!   fee-adjusted invariant, square roots).
//! - [`Uq112x112`] for price accumulators.
//!
//! # Feature-gated conversions
//!
//! | Feature | Conversion | Use case |
//! |---------|------------|----------|
//! | `fixed-point` | `Uq112x112::to_u64f64` | TWAP consumers working in `fixed` |

mod checked;
mod uq112x112;
pub mod wide;

pub use checked::CheckedArithmetic;
pub use uq112x112::{Uq112x112, RESOLUTION};
