//! In-memory fungible asset ledger.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::FungibleAsset;

/// A plain balance-and-allowance ledger for one asset.
///
/// Zero balances and zero allowances are not stored, so two ledgers that
/// describe the same state compare equal.
///
/// The null address is a sink: it can receive units but never send or
/// approve them, so anything credited to it is locked for good.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Address, Amount};
/// use pairswap::ledger::TokenLedger;
/// use pairswap::traits::FungibleAsset;
///
/// let alice = Address::repeat(0xa1);
/// let bob = Address::repeat(0xb0);
///
/// let mut usdc = TokenLedger::new();
/// usdc.mint(alice, Amount::new(100)).expect("mint");
/// usdc.transfer(alice, bob, Amount::new(40)).expect("transfer");
/// assert_eq!(usdc.balance_of(bob), Amount::new(40));
/// assert_eq!(usdc.total_supply(), Amount::new(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` new units for `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the supply would
    /// exceed `u128`.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<(), AmmError> {
        let supply = self.total_supply.safe_add(&amount)?;
        self.credit(to, amount)?;
        self.total_supply = supply;
        Ok(())
    }

    /// Destroys `amount` units held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less.
    pub fn burn(&mut self, from: Address, amount: Amount) -> Result<(), AmmError> {
        self.debit(from, amount)?;
        self.total_supply = self.total_supply.safe_sub(&amount)?;
        Ok(())
    }

    /// Iterates over holders with a non-zero balance, in no particular
    /// order.
    pub fn holders(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.balances.iter().map(|(a, b)| (*a, *b))
    }

    fn debit(&mut self, from: Address, amount: Amount) -> Result<(), AmmError> {
        let balance = self.balance_of(from);
        let rest = balance
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        if rest.is_zero() {
            self.balances.remove(&from);
        } else {
            self.balances.insert(from, rest);
        }
        Ok(())
    }

    fn credit(&mut self, to: Address, amount: Amount) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.balance_of(to).safe_add(&amount)?;
        self.balances.insert(to, balance);
        Ok(())
    }
}

impl FungibleAsset for TokenLedger {
    fn balance_of(&self, holder: Address) -> Amount {
        self.balances.get(&holder).copied().unwrap_or(Amount::ZERO)
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        if from.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        self.debit(from, amount)?;
        // Cannot overflow: the credited amount was just part of the supply.
        self.credit(to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if from.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let allowed = self.allowance(from, spender);
        let remaining = if spender == from || allowed == Amount::MAX {
            None
        } else {
            Some(
                allowed
                    .checked_sub(&amount)
                    .ok_or(AmmError::InsufficientAllowance)?,
            )
        };
        self.transfer(from, to, amount)?;
        if let Some(rest) = remaining {
            self.approve(from, spender, rest)?;
        }
        Ok(())
    }

    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if owner.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
        Ok(())
    }

    fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ALICE: Address = Address::repeat(0xa1);
    const BOB: Address = Address::repeat(0xb0);
    const ROUTER: Address = Address::repeat(0x70);

    fn funded() -> TokenLedger {
        let mut ledger = TokenLedger::new();
        let Ok(()) = ledger.mint(ALICE, Amount::new(1_000)) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn mint_and_burn_track_supply() {
        let mut ledger = funded();
        assert_eq!(ledger.total_supply(), Amount::new(1_000));
        assert!(ledger.burn(ALICE, Amount::new(400)).is_ok());
        assert_eq!(ledger.total_supply(), Amount::new(600));
        assert_eq!(
            ledger.burn(ALICE, Amount::new(601)),
            Err(AmmError::InsufficientBalance)
        );
    }

    #[test]
    fn transfer_moves_exact_amount() {
        let mut ledger = funded();
        assert!(ledger.transfer(ALICE, BOB, Amount::new(250)).is_ok());
        assert_eq!(ledger.balance_of(ALICE), Amount::new(750));
        assert_eq!(ledger.balance_of(BOB), Amount::new(250));
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let mut ledger = funded();
        let before = ledger.clone();
        assert_eq!(
            ledger.transfer(ALICE, BOB, Amount::new(1_001)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn self_transfer_is_a_no_op() {
        let mut ledger = funded();
        assert!(ledger.transfer(ALICE, ALICE, Amount::new(1_000)).is_ok());
        assert_eq!(ledger, funded());
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let mut ledger = funded();
        assert!(ledger.approve(ALICE, ROUTER, Amount::new(300)).is_ok());
        assert!(ledger
            .transfer_from(ROUTER, ALICE, BOB, Amount::new(200))
            .is_ok());
        assert_eq!(ledger.allowance(ALICE, ROUTER), Amount::new(100));
        assert_eq!(
            ledger.transfer_from(ROUTER, ALICE, BOB, Amount::new(101)),
            Err(AmmError::InsufficientAllowance)
        );
    }

    #[test]
    fn unlimited_allowance_is_not_decremented() {
        let mut ledger = funded();
        assert!(ledger.approve(ALICE, ROUTER, Amount::MAX).is_ok());
        assert!(ledger
            .transfer_from(ROUTER, ALICE, BOB, Amount::new(500))
            .is_ok());
        assert_eq!(ledger.allowance(ALICE, ROUTER), Amount::MAX);
    }

    #[test]
    fn owner_needs_no_allowance() {
        let mut ledger = funded();
        assert!(ledger
            .transfer_from(ALICE, ALICE, BOB, Amount::new(1))
            .is_ok());
    }

    #[test]
    fn mint_overflow_is_rejected() {
        let mut ledger = funded();
        let Err(AmmError::ArithmeticOverflow(_)) = ledger.mint(BOB, Amount::MAX) else {
            panic!("expected ArithmeticOverflow");
        };
        assert_eq!(ledger, funded());
    }

    #[test]
    fn null_address_can_receive_but_never_send() {
        let mut ledger = funded();
        assert!(ledger.mint(Address::zero(), Amount::new(50)).is_ok());
        assert!(ledger
            .transfer(ALICE, Address::zero(), Amount::new(10))
            .is_ok());
        let before = ledger.clone();

        assert_eq!(
            ledger.transfer(Address::zero(), BOB, Amount::new(1)),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            ledger.approve(Address::zero(), ROUTER, Amount::MAX),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            ledger.transfer_from(ROUTER, Address::zero(), BOB, Amount::new(1)),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            ledger.transfer_from(Address::zero(), Address::zero(), BOB, Amount::new(1)),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.balance_of(Address::zero()), Amount::new(60));
    }
}
