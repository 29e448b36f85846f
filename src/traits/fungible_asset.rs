//! Fungible asset ledgers the engine and router move value through.
//!
//! [`FungibleAsset`] is the surface of a single asset: balances, supply,
//! transfers, and allowances.  [`AssetBook`] is the engine's view of many
//! assets at once, addressed by asset identifier.  The engine never
//! tracks balances itself; it reads them from the book before and after
//! every operation and credits the difference.
//!
//! # Allowance Semantics
//!
//! An allowance of [`Amount::MAX`] is unlimited: `transfer_from` does not
//! decrement it.  Any other allowance is reduced by the amount moved.

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::txn::Checkpoint;

/// A single fungible asset ledger.
///
/// # Contract
///
/// - Transfers move exactly `amount` or fail with no effect.
/// - `balance_of` of an unknown holder is zero.
/// - The sum of all balances equals `total_supply`.
///
/// Fee-on-transfer and rebasing assets do not satisfy this contract and
/// are not supported.
pub trait FungibleAsset {
    /// Balance of `holder`.
    fn balance_of(&self, holder: Address) -> Amount;

    /// Sum of all balances.
    fn total_supply(&self) -> Amount;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `from` is the null address.
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`.
    ///
    /// No allowance is needed when `spender == from`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAddress`] if `from` is the null address.
    /// - [`AmmError::InsufficientAllowance`] if `spender` may not move
    ///   that much of `from`'s balance.
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Sets the allowance of `spender` over `owner`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAddress`] if `owner` is the null address.
    fn approve(&mut self, owner: Address, spender: Address, amount: Amount)
        -> Result<(), AmmError>;

    /// Remaining allowance of `spender` over `owner`'s balance.
    fn allowance(&self, owner: Address, spender: Address) -> Amount;
}

/// A collection of fungible assets addressed by identifier.
///
/// Engine entry points are generic over `AssetBook`.  A failed call
/// restores the book from a [`Checkpoint`] of the assets it touched, scoped
/// by asset identifier.  Flash swaps let the callee touch any asset, so
/// they snapshot the whole book through `Clone` instead (see
/// [`crate::txn`]).
///
/// # Errors
///
/// Every method returns [`AmmError::UnknownAsset`] when `asset` is not in
/// the book, in addition to the per-asset errors of [`FungibleAsset`].
pub trait AssetBook: Clone + Checkpoint<Scope = [Address]> {
    /// Balance of `holder` in `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not in the book.
    fn balance_of(&self, asset: Address, holder: Address) -> Result<Amount, AmmError>;

    /// Total supply of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not in the book.
    fn total_supply(&self, asset: Address) -> Result<Amount, AmmError>;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// See [`FungibleAsset::transfer`].
    fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` of `asset` from `from` to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// See [`FungibleAsset::transfer_from`].
    fn transfer_from(
        &mut self,
        asset: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Sets the allowance of `spender` over `owner`'s `asset` balance.
    ///
    /// # Errors
    ///
    /// See [`FungibleAsset::approve`].
    fn approve(
        &mut self,
        asset: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Remaining allowance of `spender` over `owner`'s `asset` balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownAsset`] if `asset` is not in the book.
    fn allowance(&self, asset: Address, owner: Address, spender: Address)
        -> Result<Amount, AmmError>;
}
