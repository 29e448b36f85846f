//! Multi-asset book backed by in-memory ledgers.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::traits::{AssetBook, FungibleAsset};
use crate::txn::Checkpoint;

use super::TokenLedger;

/// An [`AssetBook`] holding one ledger per registered asset.
///
/// Generic over the per-asset ledger so hosts can plug in their own
/// [`FungibleAsset`] implementation; [`TokenLedger`] is the default.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount};
/// use pairswap::ledger::AssetBank;
/// use pairswap::traits::AssetBook;
///
/// let usdc = Address::repeat(1);
/// let alice = Address::repeat(0xa1);
///
/// let mut bank: AssetBank = AssetBank::new();
/// bank.mint(usdc, alice, Amount::new(5_000)).expect("mint");
/// assert_eq!(bank.balance_of(usdc, alice), Ok(Amount::new(5_000)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBank<L = TokenLedger> {
    ledgers: HashMap<Address, L>,
}

impl<L> Default for AssetBank<L> {
    fn default() -> Self {
        Self {
            ledgers: HashMap::new(),
        }
    }
}

impl<L: FungibleAsset + Clone> AssetBank<L> {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `ledger` under `asset`.
    ///
    /// Returns the previously registered ledger, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAddress`] if `asset` is null.
    pub fn register(&mut self, asset: Address, ledger: L) -> Result<Option<L>, AmmError> {
        if asset.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        Ok(self.ledgers.insert(asset, ledger))
    }

    /// Returns the ledger of `asset`.
    #[must_use]
    pub fn ledger(&self, asset: Address) -> Option<&L> {
        self.ledgers.get(&asset)
    }

    /// Returns `true` if `asset` is registered.
    #[must_use]
    pub fn contains(&self, asset: Address) -> bool {
        self.ledgers.contains_key(&asset)
    }

    fn get(&self, asset: Address) -> Result<&L, AmmError> {
        self.ledgers.get(&asset).ok_or(AmmError::UnknownAsset)
    }

    fn get_mut(&mut self, asset: Address) -> Result<&mut L, AmmError> {
        self.ledgers.get_mut(&asset).ok_or(AmmError::UnknownAsset)
    }
}

impl AssetBank<TokenLedger> {
    /// Mints `amount` of `asset` to `to`, registering the asset on first
    /// use.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `asset` is null.
    /// - [`AmmError::ArithmeticOverflow`] if the supply would overflow.
    pub fn mint(&mut self, asset: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        if asset.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.ledgers.entry(asset).or_default().mint(to, amount)
    }
}

/// Saves whole per-asset ledgers; an asset missing at checkpoint time is
/// removed again on rollback.
impl<L: Clone> Checkpoint for AssetBank<L> {
    type Scope = [Address];
    type Saved = Vec<(Address, Option<L>)>;

    fn checkpoint(&self, assets: &[Address]) -> Self::Saved {
        assets
            .iter()
            .map(|asset| (*asset, self.ledgers.get(asset).cloned()))
            .collect()
    }

    fn rollback(&mut self, saved: Self::Saved) {
        for (asset, ledger) in saved {
            match ledger {
                Some(ledger) => {
                    self.ledgers.insert(asset, ledger);
                }
                None => {
                    self.ledgers.remove(&asset);
                }
            }
        }
    }
}

impl<L: FungibleAsset + Clone> AssetBook for AssetBank<L> {
    fn balance_of(&self, asset: Address, holder: Address) -> Result<Amount, AmmError> {
        Ok(self.get(asset)?.balance_of(holder))
    }

    fn total_supply(&self, asset: Address) -> Result<Amount, AmmError> {
        Ok(self.get(asset)?.total_supply())
    }

    fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.get_mut(asset)?.transfer(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.get_mut(asset)?.transfer_from(spender, from, to, amount)
    }

    fn approve(
        &mut self,
        asset: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.get_mut(asset)?.approve(owner, spender, amount)
    }

    fn allowance(
        &self,
        asset: Address,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, AmmError> {
        Ok(self.get(asset)?.allowance(owner, spender))
    }
}
