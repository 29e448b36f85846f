//! Pair registry: one pool per unordered asset pair.

use std::collections::HashMap;

use tracing::{info, warn};

use super::derive::{pair_address, TemplateFingerprint};
use crate::config::{PairConfig, RegistryConfig};
use crate::domain::{Address, Amount, AssetPair, Shares, Timestamp};
use crate::error::{AmmError, Result};
use crate::pair::ReservePair;
use crate::traits::AssetBook;
use crate::txn::Checkpoint;

/// Creates pools and owns them.
///
/// Every pool lives at an address derived from the registry's identity,
/// its [`TemplateFingerprint`], and the canonically ordered asset pair,
/// so `(A, B)` and `(B, A)` always name the same pool.  The registry also
/// holds the protocol fee recipient (zero = off) and the one account that
/// may change it.
///
/// # Thread Safety
///
/// All mutation goes through `&mut self`.  Share the registry across
/// threads by wrapping it, together with the asset book, in a `Mutex`;
/// calls are then serialised.
///
/// # Example
///
/// ```rust
/// use pairswap::config::{PairConfig, RegistryConfig};
/// use pairswap::domain::Address;
/// use pairswap::factory::PairRegistry;
///
/// let usdc = Address::repeat(1);
/// let weth = Address::repeat(2);
/// let config = RegistryConfig::new(Address::repeat(0xfa), Address::repeat(0x5e), PairConfig::default())
///     .expect("valid config");
///
/// let mut registry = PairRegistry::new(config);
/// let pool = registry.create_pool(weth, usdc).expect("new pair");
/// assert_eq!(registry.get_pool(usdc, weth), Some(pool));
/// assert_eq!(registry.pool_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRegistry {
    address: Address,
    pair_config: PairConfig,
    fingerprint: TemplateFingerprint,
    fee_to: Address,
    fee_to_setter: Address,
    pairs: HashMap<Address, ReservePair>,
    index: HashMap<AssetPair, Address>,
    all_pairs: Vec<Address>,
}

impl PairRegistry {
    /// Creates an empty registry.  The protocol fee starts off.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        let pair_config = *config.pair();
        Self {
            address: config.address(),
            pair_config,
            fingerprint: TemplateFingerprint::of(&pair_config),
            fee_to: Address::zero(),
            fee_to_setter: config.fee_to_setter(),
            pairs: HashMap::new(),
            index: HashMap::new(),
            all_pairs: Vec::new(),
        }
    }

    /// Returns the registry's identity.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the parameters every pool is created with.
    #[must_use]
    pub const fn pair_config(&self) -> &PairConfig {
        &self.pair_config
    }

    /// Returns the fingerprint of the pair template.
    #[must_use]
    pub const fn template_fingerprint(&self) -> TemplateFingerprint {
        self.fingerprint
    }

    /// Creates the pool for `a` and `b`, in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if `a == b`.
    /// - [`AmmError::ZeroAddress`] if either is null.
    /// - [`AmmError::PoolExists`] if the pair already has a pool.
    pub fn create_pool(&mut self, a: Address, b: Address) -> Result<Address> {
        let assets = AssetPair::new(a, b)?;
        if self.index.contains_key(&assets) {
            return Err(AmmError::PoolExists);
        }
        let pool = pair_address(self.address, &self.fingerprint, &assets);
        // distinct pairs hash to distinct handles
        if self.pairs.contains_key(&pool) {
            return Err(AmmError::PoolExists);
        }
        self.pairs.insert(
            pool,
            ReservePair::new(pool, self.address, assets, self.pair_config),
        );
        self.index.insert(assets, pool);
        self.all_pairs.push(pool);
        info!(
            registry = %self.address,
            x = %assets.first(),
            y = %assets.second(),
            %pool,
            index = self.all_pairs.len(),
            "pool created"
        );
        Ok(pool)
    }

    /// Returns the pool for `a` and `b`, in either order.
    #[must_use]
    pub fn get_pool(&self, a: Address, b: Address) -> Option<Address> {
        let assets = AssetPair::new(a, b).ok()?;
        self.index.get(&assets).copied()
    }

    /// Returns the number of pools created so far.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.all_pairs.len()
    }

    /// Returns the `index`-th pool in creation order.
    #[must_use]
    pub fn pool_at(&self, index: usize) -> Option<Address> {
        self.all_pairs.get(index).copied()
    }

    /// Returns every pool in creation order.
    #[must_use]
    pub fn all_pools(&self) -> &[Address] {
        &self.all_pairs
    }

    /// Returns the pool engine at `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no pool lives there.
    pub fn pair(&self, pool: Address) -> Result<&ReservePair> {
        self.pairs.get(&pool).ok_or(AmmError::PoolNotFound)
    }

    /// Returns the pool engine at `pool`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no pool lives there.
    pub fn pair_mut(&mut self, pool: Address) -> Result<&mut ReservePair> {
        self.pairs.get_mut(&pool).ok_or(AmmError::PoolNotFound)
    }

    // -- protocol fee -------------------------------------------------------

    /// Returns the protocol fee recipient, or `None` if the fee is off.
    #[must_use]
    pub fn fee_recipient(&self) -> Option<Address> {
        (!self.fee_to.is_zero()).then_some(self.fee_to)
    }

    /// Returns the account allowed to change the fee recipient.
    #[must_use]
    pub const fn fee_recipient_setter(&self) -> Address {
        self.fee_to_setter
    }

    /// Sets the protocol fee recipient.  [`Address::zero`] turns it off.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Forbidden`] unless `caller` is the setter.
    pub fn set_fee_recipient(&mut self, caller: Address, fee_to: Address) -> Result<()> {
        self.authorize(caller, "set_fee_recipient")?;
        self.fee_to = fee_to;
        info!(registry = %self.address, %fee_to, "fee recipient changed");
        Ok(())
    }

    /// Hands the setter role to `setter`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Forbidden`] unless `caller` is the setter.
    pub fn set_fee_recipient_setter(&mut self, caller: Address, setter: Address) -> Result<()> {
        self.authorize(caller, "set_fee_recipient_setter")?;
        self.fee_to_setter = setter;
        info!(registry = %self.address, %setter, "fee recipient setter changed");
        Ok(())
    }

    fn authorize(&self, caller: Address, action: &'static str) -> Result<()> {
        if caller != self.fee_to_setter {
            warn!(registry = %self.address, %caller, action, "forbidden");
            return Err(AmmError::Forbidden);
        }
        Ok(())
    }

    // -- share mint / burn --------------------------------------------------

    /// Mints shares of `pool` for whatever was deposited since its last
    /// update, paying the protocol fee first if it is on.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if no pool lives at `pool`.
    /// - See [`ReservePair`] for the engine's own errors.
    pub fn mint<B: AssetBook>(
        &mut self,
        pool: Address,
        book: &mut B,
        to: Address,
        now: Timestamp,
    ) -> Result<Shares> {
        let fee_to = self.fee_recipient();
        self.pair_mut(pool)?.mint(book, to, fee_to, now)
    }

    /// Redeems the shares held at `pool`'s own address, paying the
    /// protocol fee first if it is on.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if no pool lives at `pool`.
    /// - See [`ReservePair`] for the engine's own errors.
    pub fn burn<B: AssetBook>(
        &mut self,
        pool: Address,
        book: &mut B,
        to: Address,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        let fee_to = self.fee_recipient();
        self.pair_mut(pool)?.burn(book, to, fee_to, now)
    }

    pub(crate) fn mint_nested<B: AssetBook>(
        &mut self,
        pool: Address,
        book: &mut B,
        to: Address,
        now: Timestamp,
    ) -> Result<Shares> {
        let fee_to = self.fee_recipient();
        self.pair_mut(pool)?.mint_nested(book, to, fee_to, now)
    }

    pub(crate) fn burn_nested<B: AssetBook>(
        &mut self,
        pool: Address,
        book: &mut B,
        to: Address,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        let fee_to = self.fee_recipient();
        self.pair_mut(pool)?.burn_nested(book, to, fee_to, now)
    }
}

/// Saved state of selected pools, plus the pool count at the time.
#[derive(Debug, Clone)]
pub struct RegistryCheckpoint {
    pool_count: usize,
    pairs: Vec<ReservePair>,
}

/// Saves the named pools only.  Rollback also forgets every pool created
/// after the checkpoint; fee settings are never saved.
impl Checkpoint for PairRegistry {
    type Scope = [Address];
    type Saved = RegistryCheckpoint;

    fn checkpoint(&self, pools: &[Address]) -> RegistryCheckpoint {
        RegistryCheckpoint {
            pool_count: self.all_pairs.len(),
            pairs: pools
                .iter()
                .filter_map(|pool| self.pairs.get(pool).cloned())
                .collect(),
        }
    }

    fn rollback(&mut self, saved: RegistryCheckpoint) {
        for pool in self.all_pairs.drain(saved.pool_count..) {
            if let Some(pair) = self.pairs.remove(&pool) {
                self.index.remove(&pair.assets());
            }
        }
        for pair in saved.pairs {
            self.pairs.insert(pair.address(), pair);
        }
    }
}
