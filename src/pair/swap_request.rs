//! Requested outputs of a pool swap.

use crate::domain::{Address, Amount, AssetPair};
use crate::error::AmmError;

/// The outputs a caller asks a pool to pay, and where to send them.
///
/// The pool works out the input on its own by comparing balances with
/// reserves, so a request names outputs only.  A single-hop trade sets one
/// side; a flash swap may set both.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount, AssetPair};
/// use pairswap::pair::SwapRequest;
///
/// let pair = AssetPair::new(Address::repeat(1), Address::repeat(2)).expect("pair");
/// let trader = Address::repeat(0xa1);
///
/// let req = SwapRequest::single(&pair, Address::repeat(2), Amount::new(90), trader)
///     .expect("asset in pair");
/// assert_eq!(req.amount_x_out(), Amount::ZERO);
/// assert_eq!(req.amount_y_out(), Amount::new(90));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapRequest {
    amount_x_out: Amount,
    amount_y_out: Amount,
    to: Address,
}

impl SwapRequest {
    /// Creates a request with explicit outputs on both sides.
    pub const fn new(amount_x_out: Amount, amount_y_out: Amount, to: Address) -> Self {
        Self {
            amount_x_out,
            amount_y_out,
            to,
        }
    }

    /// Requests `amount` of `asset_out` only.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `asset_out` is not in `pair`.
    pub fn single(
        pair: &AssetPair,
        asset_out: Address,
        amount: Amount,
        to: Address,
    ) -> Result<Self, AmmError> {
        if !pair.contains(&asset_out) {
            return Err(AmmError::InvalidPath);
        }
        if pair.is_first(&asset_out) {
            Ok(Self::new(amount, Amount::ZERO, to))
        } else {
            Ok(Self::new(Amount::ZERO, amount, to))
        }
    }

    /// Requested output of the pool's `x` asset.
    #[must_use]
    pub const fn amount_x_out(&self) -> Amount {
        self.amount_x_out
    }

    /// Requested output of the pool's `y` asset.
    #[must_use]
    pub const fn amount_y_out(&self) -> Amount {
        self.amount_y_out
    }

    /// Recipient of the outputs.
    #[must_use]
    pub const fn to(&self) -> Address {
        self.to
    }
}
