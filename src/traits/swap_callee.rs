//! Flash-swap callback interface.
//!
//! A flash swap pays the requested outputs out first and then hands
//! control to a [`SwapCallee`].  The callee may do anything with the
//! borrowed assets as long as, when it returns, the pool's balances
//! satisfy the fee-adjusted invariant.  The pool re-reads balances from
//! the book after the callback; nothing the callee reports is trusted.

use super::AssetBook;
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::pair::ReservePair;

/// What a pool tells its flash-swap callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashSwap<'a> {
    /// Who initiated the swap.
    pub sender: Address,
    /// Amount of the pool's `x` asset already paid to the recipient.
    pub amount_x_out: Amount,
    /// Amount of the pool's `y` asset already paid to the recipient.
    pub amount_y_out: Amount,
    /// Opaque bytes passed through from the initiator.
    pub data: &'a [u8],
}

/// Receiver of a flash-swap callback.
///
/// The callee gets the pool itself while the pool is locked: read-only
/// getters work, and every mutating entry point fails with
/// [`AmmError::Locked`].
pub trait SwapCallee<B: AssetBook> {
    /// Runs between the optimistic transfer and the invariant check.
    ///
    /// # Errors
    ///
    /// Any error aborts the swap; the pool and the book are restored.
    fn on_flash_swap(
        &mut self,
        pair: &mut ReservePair,
        book: &mut B,
        swap: FlashSwap<'_>,
    ) -> Result<(), AmmError>;
}
