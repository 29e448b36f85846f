//! Pool share ledger.

use crate::domain::{Address, Amount, Shares};
use crate::error::AmmError;
use crate::traits::FungibleAsset;

use super::TokenLedger;

/// Fungible claims on a pool's reserves.
///
/// Anyone can transfer and approve shares through [`FungibleAsset`]; only
/// the owning pool can create or destroy them.  The sum of all balances,
/// including the burn address, always equals
/// [`total_shares`](Self::total_shares).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolShareLedger {
    inner: TokenLedger,
}

impl PoolShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn shares_of(&self, holder: Address) -> Shares {
        Shares::from(self.inner.balance_of(holder))
    }

    /// Total shares outstanding.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        Shares::from(self.inner.total_supply())
    }

    /// Iterates over holders with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (Address, Shares)> + '_ {
        self.inner.holders().map(|(a, b)| (a, Shares::from(b)))
    }

    pub(crate) fn mint(&mut self, to: Address, shares: Shares) -> Result<(), AmmError> {
        self.inner.mint(to, shares.as_amount())
    }

    pub(crate) fn burn(&mut self, from: Address, shares: Shares) -> Result<(), AmmError> {
        self.inner.burn(from, shares.as_amount())
    }
}

impl FungibleAsset for PoolShareLedger {
    fn balance_of(&self, holder: Address) -> Amount {
        self.inner.balance_of(holder)
    }

    fn total_supply(&self) -> Amount {
        self.inner.total_supply()
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        self.inner.transfer(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.inner.transfer_from(spender, from, to, amount)
    }

    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.inner.approve(owner, spender, amount)
    }

    fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.inner.allowance(owner, spender)
    }
}
