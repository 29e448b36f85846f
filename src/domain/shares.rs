//! Pool-ownership share units.

use core::fmt;

use super::Amount;

/// A quantity of pool shares.
///
/// Distinct from [`Amount`] because it measures proportional ownership of
/// a pool's reserves, not a quantity of either asset.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Shares;
///
/// let minted = Shares::new(1_000);
/// assert_eq!(minted.checked_sub(&Shares::new(1_000)), Some(Shares::ZERO));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` value from a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the share count as a transferable [`Amount`].
    ///
    /// The share ledger speaks the same fungible-asset surface as any
    /// other asset, so transfers of shares are denominated in `Amount`.
    #[must_use]
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl From<Amount> for Shares {
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
