//! Constant-product pair engine (Uniswap V2 style).
//!
//! A pair holds two reserves and issues shares against them.  It never
//! trusts amounts reported by callers: every entry point reads the pool's
//! balances from the [`AssetBook`] and credits whatever arrived since the
//! last update.
//!
//! # Swap Invariant
//!
//! With `in_x`, `in_y` the amounts that arrived and `b_x`, `b_y` the
//! balances after the outputs left, a swap succeeds only if
//!
//! ```text
//! (b_x · den − in_x · num) · (b_y · den − in_y · num) ≥ r_x · r_y · den²
//! ```
//!
//! where `num / den` is the swap fee.  The fee is charged on the input
//! side only and stays in the reserves.
//!
//! # Atomicity
//!
//! Every mutating entry point saves the pair and the ledgers of its two
//! assets and restores them on error.  A flash swap saves the whole book
//! instead, since its callee may move any asset.  The pair is locked for
//! the duration of the call; a mutating call that arrives while it is
//! locked fails with [`AmmError::Locked`].

use primitive_types::U256;
use tracing::{debug, info};

use super::oracle::{accumulate, block_timestamp};
use super::SwapRequest;
use crate::config::PairConfig;
use crate::domain::{Address, Amount, AssetPair, Rounding, Shares, Timestamp};
use crate::error::{AmmError, Result};
use crate::ledger::PoolShareLedger;
use crate::math::{wide, CheckedArithmetic};
use crate::traits::{AssetBook, FlashSwap, SwapCallee};
use crate::txn::{self, Checkpoint};

/// Lifecycle of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairState {
    /// Created, no shares outstanding.
    Uninitialized,
    /// Initialised by a first deposit.  Never goes back: the minimum
    /// liquidity is locked forever.
    Active,
}

/// A constant-product pool over two assets.
///
/// Pairs are created by a [`PairRegistry`](crate::factory::PairRegistry)
/// and live inside it.  Share minting and burning go through the registry
/// (it supplies the protocol fee recipient); swaps, `sync`, and `skim` can
/// be called on the pair directly.
///
/// # State
///
/// - `reserve_x` / `reserve_y`: balances as of the last update, each at
///   most [`MAX_RESERVE`](Self::MAX_RESERVE)
/// - `block_timestamp_last`: time of the last update, mod 2^32
/// - `price_x_cumulative` / `price_y_cumulative`: wrapping UQ112x112
///   accumulators (see [`oracle`](super::oracle))
/// - `k_last`: `r_x · r_y` after the last share mint or burn while the
///   protocol fee was on, else zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservePair {
    address: Address,
    registry: Address,
    assets: AssetPair,
    config: PairConfig,
    reserve_x: Amount,
    reserve_y: Amount,
    block_timestamp_last: u32,
    price_x_cumulative: U256,
    price_y_cumulative: U256,
    k_last: U256,
    shares: PoolShareLedger,
    locked: bool,
}

impl ReservePair {
    /// Largest balance a reserve can hold: `2^112 − 1`.
    pub const MAX_RESERVE: Amount = Amount::new((1u128 << 112) - 1);

    pub(crate) fn new(
        address: Address,
        registry: Address,
        assets: AssetPair,
        config: PairConfig,
    ) -> Self {
        Self {
            address,
            registry,
            assets,
            config,
            reserve_x: Amount::ZERO,
            reserve_y: Amount::ZERO,
            block_timestamp_last: 0,
            price_x_cumulative: U256::zero(),
            price_y_cumulative: U256::zero(),
            k_last: U256::zero(),
            shares: PoolShareLedger::new(),
            locked: false,
        }
    }

    // -- read-only ----------------------------------------------------------

    /// Returns the pool's handle.  Reserves are held at this address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the registry that created the pool.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// Returns the canonically ordered asset pair.
    #[must_use]
    pub const fn assets(&self) -> AssetPair {
        self.assets
    }

    /// Returns the lower asset identifier.
    #[must_use]
    pub const fn asset_x(&self) -> Address {
        self.assets.first()
    }

    /// Returns the higher asset identifier.
    #[must_use]
    pub const fn asset_y(&self) -> Address {
        self.assets.second()
    }

    /// Returns the template parameters the pool was created with.
    #[must_use]
    pub const fn config(&self) -> &PairConfig {
        &self.config
    }

    /// Returns `(reserve_x, reserve_y, block_timestamp_last)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount, u32) {
        (self.reserve_x, self.reserve_y, self.block_timestamp_last)
    }

    /// Returns `(reserve of asset, reserve of the other asset)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPath`] if `asset` is not in the pair.
    pub fn reserves_for(&self, asset: Address) -> Result<(Amount, Amount)> {
        if !self.assets.contains(&asset) {
            return Err(AmmError::InvalidPath);
        }
        if self.assets.is_first(&asset) {
            Ok((self.reserve_x, self.reserve_y))
        } else {
            Ok((self.reserve_y, self.reserve_x))
        }
    }

    /// Cumulative price of `x` in units of `y`, UQ112x112, wrapping.
    #[must_use]
    pub const fn price_x_cumulative(&self) -> U256 {
        self.price_x_cumulative
    }

    /// Cumulative price of `y` in units of `x`, UQ112x112, wrapping.
    #[must_use]
    pub const fn price_y_cumulative(&self) -> U256 {
        self.price_y_cumulative
    }

    /// `r_x · r_y` as of the last fee-bearing mint or burn.
    #[must_use]
    pub const fn k_last(&self) -> U256 {
        self.k_last
    }

    /// Total shares outstanding, including the locked minimum.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.shares.total_shares()
    }

    /// Read access to the share ledger.
    #[must_use]
    pub const fn shares(&self) -> &PoolShareLedger {
        &self.shares
    }

    /// Share ledger, for transfers and approvals.
    pub fn shares_mut(&mut self) -> &mut PoolShareLedger {
        &mut self.shares
    }

    /// Returns `true` while a mutating call is in progress.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> PairState {
        if self.total_shares().is_zero() {
            PairState::Uninitialized
        } else {
            PairState::Active
        }
    }

    // -- share mint / burn ---------------------------------------------------

    /// Mints shares for whatever was deposited since the last update.
    ///
    /// The first deposit mints `⌊√(x·y)⌋ − MINIMUM_LIQUIDITY` to `to` and
    /// locks `MINIMUM_LIQUIDITY` at the burn address.  Later deposits mint
    /// `min(x·S/r_x, y·S/r_y)`; an unbalanced surplus is not refunded.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInitialLiquidity`] if the first deposit
    ///   does not exceed the locked minimum.
    /// - [`AmmError::InsufficientLiquidityMinted`] if zero shares result.
    /// - [`AmmError::Locked`] if called re-entrantly.
    pub(crate) fn mint<B: AssetBook>(
        &mut self,
        book: &mut B,
        to: Address,
        fee_to: Option<Address>,
        now: Timestamp,
    ) -> Result<Shares> {
        self.guarded(book, |pair, book| pair.mint_locked(book, to, fee_to, now))
    }

    /// [`mint`](Self::mint) without a checkpoint; the caller must hold one
    /// covering this pair and both of its assets.
    pub(crate) fn mint_nested<B: AssetBook>(
        &mut self,
        book: &mut B,
        to: Address,
        fee_to: Option<Address>,
        now: Timestamp,
    ) -> Result<Shares> {
        self.with_lock(book, |pair, book| pair.mint_locked(book, to, fee_to, now))
    }

    fn mint_locked<B: AssetBook>(
        &mut self,
        book: &mut B,
        to: Address,
        fee_to: Option<Address>,
        now: Timestamp,
    ) -> Result<Shares> {
        let (reserve_x, reserve_y) = (self.reserve_x, self.reserve_y);
        let (balance_x, balance_y) = self.balances(book)?;
        let amount_x = balance_x.safe_sub(&reserve_x)?;
        let amount_y = balance_y.safe_sub(&reserve_y)?;

        let fee_on = self.mint_fee(fee_to, reserve_x, reserve_y)?;
        let total = self.shares.total_shares();
        let liquidity = if total.is_zero() {
            let minimum = self.config.minimum_liquidity();
            let root = wide::isqrt(wide::product(amount_x.get(), amount_y.get()));
            let root = Shares::new(wide::narrow(root, "initial share root")?);
            if root <= minimum {
                return Err(AmmError::InsufficientInitialLiquidity);
            }
            self.shares.mint(Address::zero(), minimum)?;
            root.safe_sub(&minimum)?
        } else {
            let by_x = wide::mul_div(amount_x.get(), total.get(), reserve_x.get(), Rounding::Down)?;
            let by_y = wide::mul_div(amount_y.get(), total.get(), reserve_y.get(), Rounding::Down)?;
            Shares::new(by_x.min(by_y))
        };
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        self.shares.mint(to, liquidity)?;

        self.update(balance_x, balance_y, reserve_x, reserve_y, now)?;
        if fee_on {
            self.k_last = wide::product(self.reserve_x.get(), self.reserve_y.get());
        }
        info!(
            pair = %self.address,
            %to,
            %amount_x,
            %amount_y,
            shares = %liquidity,
            "liquidity added"
        );
        Ok(liquidity)
    }

    /// Redeems the shares held at the pool's own address.
    ///
    /// Pays out `shares · balance / S` of each asset, measured against
    /// actual balances, so donations are shared with the redeemer.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is
    ///   zero.
    /// - [`AmmError::Locked`] if called re-entrantly.
    pub(crate) fn burn<B: AssetBook>(
        &mut self,
        book: &mut B,
        to: Address,
        fee_to: Option<Address>,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        self.guarded(book, |pair, book| pair.burn_locked(book, to, fee_to, now))
    }

    /// [`burn`](Self::burn) without a checkpoint; the caller must hold one
    /// covering this pair and both of its assets.
    pub(crate) fn burn_nested<B: AssetBook>(
        &mut self,
        book: &mut B,
        to: Address,
        fee_to: Option<Address>,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        self.with_lock(book, |pair, book| pair.burn_locked(book, to, fee_to, now))
    }

    fn burn_locked<B: AssetBook>(
        &mut self,
        book: &mut B,
        to: Address,
        fee_to: Option<Address>,
        now: Timestamp,
    ) -> Result<(Amount, Amount)> {
        let (reserve_x, reserve_y) = (self.reserve_x, self.reserve_y);
        let (balance_x, balance_y) = self.balances(book)?;
        let liquidity = self.shares.shares_of(self.address);
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }

        let fee_on = self.mint_fee(fee_to, reserve_x, reserve_y)?;
        let total = self.shares.total_shares();
        let amount_x = Amount::new(wide::mul_div(
            liquidity.get(),
            balance_x.get(),
            total.get(),
            Rounding::Down,
        )?);
        let amount_y = Amount::new(wide::mul_div(
            liquidity.get(),
            balance_y.get(),
            total.get(),
            Rounding::Down,
        )?);
        if amount_x.is_zero() || amount_y.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }

        self.shares.burn(self.address, liquidity)?;
        book.transfer(self.assets.first(), self.address, to, amount_x)?;
        book.transfer(self.assets.second(), self.address, to, amount_y)?;

        let (balance_x, balance_y) = self.balances(book)?;
        self.update(balance_x, balance_y, reserve_x, reserve_y, now)?;
        if fee_on {
            self.k_last = wide::product(self.reserve_x.get(), self.reserve_y.get());
        }
        info!(
            pair = %self.address,
            %to,
            %amount_x,
            %amount_y,
            shares = %liquidity,
            "liquidity removed"
        );
        Ok((amount_x, amount_y))
    }

    // -- swaps --------------------------------------------------------------

    /// Pays out the requested amounts, then checks that enough input
    /// arrived beforehand to keep the fee-adjusted invariant.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::InsufficientLiquidity`] if an output is not below its
    ///   reserve.
    /// - [`AmmError::InvalidRecipient`] if the recipient is one of the
    ///   pair's assets.
    /// - [`AmmError::InsufficientInputAmount`] if nothing arrived.
    /// - [`AmmError::InvariantViolation`] if too little arrived.
    /// - [`AmmError::Locked`] if called re-entrantly.
    pub fn swap<B: AssetBook>(
        &mut self,
        book: &mut B,
        request: SwapRequest,
        now: Timestamp,
    ) -> Result<()> {
        self.guarded(book, |pair, book| {
            pair.swap_locked(book, request, None, now)
        })
    }

    /// [`swap`](Self::swap) without a checkpoint; the caller must hold one
    /// covering this pair and both of its assets.
    pub(crate) fn swap_nested<B: AssetBook>(
        &mut self,
        book: &mut B,
        request: SwapRequest,
        now: Timestamp,
    ) -> Result<()> {
        self.with_lock(book, |pair, book| {
            pair.swap_locked(book, request, None, now)
        })
    }

    /// Like [`swap`](Self::swap), but calls `callee` after the outputs
    /// are paid and before balances are checked.
    ///
    /// The callee may supply the input, in either asset, from the
    /// proceeds of the outputs.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap), plus whatever the callee returns.
    pub fn flash_swap<B: AssetBook>(
        &mut self,
        book: &mut B,
        sender: Address,
        request: SwapRequest,
        callee: &mut dyn SwapCallee<B>,
        data: &[u8],
        now: Timestamp,
    ) -> Result<()> {
        if self.locked {
            return Err(AmmError::Locked);
        }
        txn::atomically(self, book, |pair, book| {
            pair.with_lock(book, |pair, book| {
                pair.swap_locked(book, request, Some((callee, sender, data)), now)
            })
        })
    }

    fn swap_locked<B: AssetBook>(
        &mut self,
        book: &mut B,
        request: SwapRequest,
        callback: Option<(&mut dyn SwapCallee<B>, Address, &[u8])>,
        now: Timestamp,
    ) -> Result<()> {
        let amount_x_out = request.amount_x_out();
        let amount_y_out = request.amount_y_out();
        if amount_x_out.is_zero() && amount_y_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let (reserve_x, reserve_y) = (self.reserve_x, self.reserve_y);
        if amount_x_out >= reserve_x || amount_y_out >= reserve_y {
            return Err(AmmError::InsufficientLiquidity);
        }
        let to = request.to();
        if self.assets.contains(&to) {
            return Err(AmmError::InvalidRecipient);
        }

        if !amount_x_out.is_zero() {
            book.transfer(self.assets.first(), self.address, to, amount_x_out)?;
        }
        if !amount_y_out.is_zero() {
            book.transfer(self.assets.second(), self.address, to, amount_y_out)?;
        }
        if let Some((callee, sender, data)) = callback {
            let swap = FlashSwap {
                sender,
                amount_x_out,
                amount_y_out,
                data,
            };
            callee.on_flash_swap(self, book, swap)?;
        }

        let (balance_x, balance_y) = self.balances(book)?;
        let amount_x_in = balance_x.saturating_sub(&reserve_x.saturating_sub(&amount_x_out));
        let amount_y_in = balance_y.saturating_sub(&reserve_y.saturating_sub(&amount_y_out));
        if amount_x_in.is_zero() && amount_y_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }

        let fee = self.config.swap_fee();
        let num = U256::from(fee.numerator());
        let den = U256::from(fee.denominator());
        let adjusted_x = wide::checked_sub(
            wide::widen(balance_x.get()) * den,
            wide::widen(amount_x_in.get()) * num,
            "adjusted balance x",
        )?;
        let adjusted_y = wide::checked_sub(
            wide::widen(balance_y.get()) * den,
            wide::widen(amount_y_in.get()) * num,
            "adjusted balance y",
        )?;
        let k_before = wide::product(reserve_x.get(), reserve_y.get());
        if !wide::product_at_least(adjusted_x, adjusted_y, k_before, den * den) {
            return Err(AmmError::InvariantViolation);
        }

        self.update(balance_x, balance_y, reserve_x, reserve_y, now)?;
        debug!(
            pair = %self.address,
            %amount_x_in,
            %amount_y_in,
            %amount_x_out,
            %amount_y_out,
            %to,
            "swap"
        );
        Ok(())
    }

    // -- reconciliation -----------------------------------------------------

    /// Sends any balance above the reserves to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ArithmeticOverflow`] if a balance is below its
    ///   reserve.
    /// - [`AmmError::Locked`] if called re-entrantly.
    pub fn skim<B: AssetBook>(&mut self, book: &mut B, to: Address) -> Result<(Amount, Amount)> {
        self.guarded(book, |pair, book| {
            let (balance_x, balance_y) = pair.balances(book)?;
            let excess_x = balance_x.safe_sub(&pair.reserve_x)?;
            let excess_y = balance_y.safe_sub(&pair.reserve_y)?;
            book.transfer(pair.assets.first(), pair.address, to, excess_x)?;
            book.transfer(pair.assets.second(), pair.address, to, excess_y)?;
            debug!(pair = %pair.address, %to, %excess_x, %excess_y, "skim");
            Ok((excess_x, excess_y))
        })
    }

    /// Sets the reserves to the current balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ArithmeticOverflow`] if a balance exceeds
    ///   [`MAX_RESERVE`](Self::MAX_RESERVE).
    /// - [`AmmError::Locked`] if called re-entrantly.
    pub fn sync<B: AssetBook>(&mut self, book: &mut B, now: Timestamp) -> Result<()> {
        self.guarded(book, |pair, book| {
            let (balance_x, balance_y) = pair.balances(book)?;
            pair.update(balance_x, balance_y, pair.reserve_x, pair.reserve_y, now)?;
            debug!(
                pair = %pair.address,
                reserve_x = %pair.reserve_x,
                reserve_y = %pair.reserve_y,
                "sync"
            );
            Ok(())
        })
    }

    // -- internals ----------------------------------------------------------

    /// Runs `op` under the lock, restoring the pair and its two asset
    /// ledgers on error.
    fn guarded<B, T, F>(&mut self, book: &mut B, op: F) -> Result<T>
    where
        B: AssetBook,
        F: FnOnce(&mut Self, &mut B) -> Result<T>,
    {
        if self.locked {
            return Err(AmmError::Locked);
        }
        let assets = [self.assets.first(), self.assets.second()];
        txn::scoped(self, &(), book, assets.as_slice(), |pair, book| {
            pair.with_lock(book, op)
        })
    }

    fn with_lock<B, T, F>(&mut self, book: &mut B, op: F) -> Result<T>
    where
        B: AssetBook,
        F: FnOnce(&mut Self, &mut B) -> Result<T>,
    {
        if self.locked {
            return Err(AmmError::Locked);
        }
        self.locked = true;
        let out = op(self, book);
        self.locked = false;
        out
    }

    fn balances<B: AssetBook>(&self, book: &B) -> Result<(Amount, Amount)> {
        Ok((
            book.balance_of(self.assets.first(), self.address)?,
            book.balance_of(self.assets.second(), self.address)?,
        ))
    }

    /// Stores new reserves, first crediting the accumulators with the
    /// time elapsed at the old reserves.
    fn update(
        &mut self,
        balance_x: Amount,
        balance_y: Amount,
        reserve_x: Amount,
        reserve_y: Amount,
        now: Timestamp,
    ) -> Result<()> {
        if balance_x > Self::MAX_RESERVE || balance_y > Self::MAX_RESERVE {
            return Err(AmmError::ArithmeticOverflow("balance exceeds reserve bound"));
        }
        let timestamp = block_timestamp(now);
        let elapsed = timestamp.wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 && !reserve_x.is_zero() && !reserve_y.is_zero() {
            self.price_x_cumulative =
                accumulate(self.price_x_cumulative, reserve_y, reserve_x, elapsed)?;
            self.price_y_cumulative =
                accumulate(self.price_y_cumulative, reserve_x, reserve_y, elapsed)?;
        }
        self.reserve_x = balance_x;
        self.reserve_y = balance_y;
        self.block_timestamp_last = timestamp;
        Ok(())
    }

    /// Mints the protocol's cut of fee growth since `k_last`.
    ///
    /// Returns whether the protocol fee is on.
    fn mint_fee(
        &mut self,
        fee_to: Option<Address>,
        reserve_x: Amount,
        reserve_y: Amount,
    ) -> Result<bool> {
        let Some(fee_to) = fee_to.filter(|a| !a.is_zero()) else {
            self.k_last = U256::zero();
            return Ok(false);
        };
        if self.k_last.is_zero() {
            return Ok(true);
        }
        let root_k = wide::isqrt(wide::product(reserve_x.get(), reserve_y.get()));
        let root_k_last = wide::isqrt(self.k_last);
        if root_k <= root_k_last {
            return Ok(true);
        }
        let total = wide::widen(self.shares.total_shares().get());
        let numerator = wide::checked_mul(total, root_k - root_k_last, "protocol fee numerator")?;
        let divisor = U256::from(self.config.protocol_fee_divisor());
        // root_k < 2^112 and divisor < 2^32: no overflow
        let denominator = root_k * (divisor - U256::one()) + root_k_last;
        let liquidity = wide::div_rounded(numerator, denominator, Rounding::Down)?;
        let liquidity = Shares::new(wide::narrow(liquidity, "protocol fee shares")?);
        if !liquidity.is_zero() {
            self.shares.mint(fee_to, liquidity)?;
            debug!(pair = %self.address, %fee_to, shares = %liquidity, "protocol fee minted");
        }
        Ok(true)
    }
}

/// A pair saves itself whole; its share ledger is local to the pool.
impl Checkpoint for ReservePair {
    type Scope = ();
    type Saved = Self;

    fn checkpoint(&self, _: &()) -> Self {
        self.clone()
    }

    fn rollback(&mut self, saved: Self) {
        *self = saved;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FeeRate;
    use crate::ledger::AssetBank;
    use crate::traits::FungibleAsset;

    const X: Address = Address::repeat(1);
    const Y: Address = Address::repeat(2);
    const POOL: Address = Address::repeat(0x50);
    const REGISTRY: Address = Address::repeat(0xfa);
    const LP: Address = Address::repeat(0xa1);
    const TRADER: Address = Address::repeat(0xb0);
    const FEE_TO: Address = Address::repeat(0xfe);
    const FUNDING: u128 = 1_000_000_000_000;

    fn pair_with(config: PairConfig) -> ReservePair {
        let Ok(assets) = AssetPair::new(X, Y) else {
            panic!("valid pair");
        };
        ReservePair::new(POOL, REGISTRY, assets, config)
    }

    fn funded_bank() -> AssetBank {
        let mut bank: AssetBank = AssetBank::new();
        for holder in [LP, TRADER] {
            for asset in [X, Y] {
                let Ok(()) = bank.mint(asset, holder, Amount::new(FUNDING)) else {
                    panic!("mint");
                };
            }
        }
        bank
    }

    fn pay(bank: &mut AssetBank, asset: Address, from: Address, amount: u128) {
        let Ok(()) = bank.transfer(asset, from, POOL, Amount::new(amount)) else {
            panic!("transfer to pool");
        };
    }

    fn balance(bank: &AssetBank, asset: Address, holder: Address) -> u128 {
        let Ok(b) = bank.balance_of(asset, holder) else {
            panic!("known asset");
        };
        b.get()
    }

    fn seeded_with(
        config: PairConfig,
        x: u128,
        y: u128,
        fee_to: Option<Address>,
    ) -> (ReservePair, AssetBank) {
        let mut pair = pair_with(config);
        let mut bank = funded_bank();
        pay(&mut bank, X, LP, x);
        pay(&mut bank, Y, LP, y);
        let Ok(_) = pair.mint(&mut bank, LP, fee_to, 0) else {
            panic!("initial mint");
        };
        (pair, bank)
    }

    fn seeded(x: u128, y: u128) -> (ReservePair, AssetBank) {
        seeded_with(PairConfig::default(), x, y, None)
    }

    fn y_out(amount: u128, to: Address) -> SwapRequest {
        SwapRequest::new(Amount::ZERO, Amount::new(amount), to)
    }

    // -- mint ----------------------------------------------------------------

    #[test]
    fn first_deposit_locks_minimum_liquidity() {
        let (pair, _) = seeded(4_000, 1_000);
        assert_eq!(pair.total_shares(), Shares::new(2_000));
        assert_eq!(pair.shares().shares_of(LP), Shares::new(1_000));
        assert_eq!(pair.shares().shares_of(Address::zero()), Shares::new(1_000));
        assert_eq!(pair.reserves(), (Amount::new(4_000), Amount::new(1_000), 0));
        assert_eq!(pair.state(), PairState::Active);
    }

    #[test]
    fn first_deposit_at_or_below_minimum_fails() {
        for (x, y) in [(1_000, 1_000), (1, 1)] {
            let mut pair = pair_with(PairConfig::default());
            let mut bank = funded_bank();
            pay(&mut bank, X, LP, x);
            pay(&mut bank, Y, LP, y);
            let before = pair.clone();
            assert_eq!(
                pair.mint(&mut bank, LP, None, 0),
                Err(AmmError::InsufficientInitialLiquidity)
            );
            assert_eq!(pair, before);
            assert_eq!(pair.state(), PairState::Uninitialized);
        }
    }

    #[test]
    fn later_deposit_takes_the_worse_ratio() {
        let (mut pair, mut bank) = seeded(4_000, 1_000);
        pay(&mut bank, X, LP, 400);
        pay(&mut bank, Y, LP, 200);
        assert_eq!(pair.mint(&mut bank, LP, None, 0), Ok(Shares::new(200)));
        assert_eq!(pair.reserves().0, Amount::new(4_400));
        assert_eq!(pair.reserves().1, Amount::new(1_200));
    }

    #[test]
    fn deposit_without_input_mints_nothing() {
        let (mut pair, mut bank) = seeded(4_000, 1_000);
        assert_eq!(
            pair.mint(&mut bank, LP, None, 0),
            Err(AmmError::InsufficientLiquidityMinted)
        );
    }

    // -- burn ----------------------------------------------------------------

    #[test]
    fn burn_pays_pro_rata() {
        let (mut pair, mut bank) = seeded(4_000, 1_000);
        let Ok(()) = pair.shares_mut().transfer(LP, POOL, Amount::new(1_000)) else {
            panic!("share transfer");
        };
        assert_eq!(
            pair.burn(&mut bank, LP, None, 0),
            Ok((Amount::new(2_000), Amount::new(500)))
        );
        assert_eq!(pair.total_shares(), Shares::new(1_000));
        assert_eq!(pair.reserves().0, Amount::new(2_000));
        assert_eq!(balance(&bank, X, LP), FUNDING - 2_000);
        assert_eq!(balance(&bank, Y, LP), FUNDING - 500);
    }

    #[test]
    fn burn_without_shares_fails() {
        let (mut pair, mut bank) = seeded(4_000, 1_000);
        assert_eq!(
            pair.burn(&mut bank, LP, None, 0),
            Err(AmmError::InsufficientLiquidityBurned)
        );
    }

    // -- swap ----------------------------------------------------------------

    #[test]
    fn swap_accepts_exact_output_and_rejects_one_more() {
        let Ok(config) = PairConfig::new(FeeRate::REFERENCE, Shares::new(1), 6) else {
            panic!("valid config");
        };
        let (mut pair, mut bank) = seeded_with(config, 1_000, 1_000, None);
        pay(&mut bank, X, TRADER, 100);

        assert_eq!(
            pair.swap(&mut bank, y_out(91, TRADER), 0),
            Err(AmmError::InvariantViolation)
        );
        assert_eq!(balance(&bank, Y, TRADER), FUNDING);

        assert_eq!(pair.swap(&mut bank, y_out(90, TRADER), 0), Ok(()));
        assert_eq!(pair.reserves().0, Amount::new(1_100));
        assert_eq!(pair.reserves().1, Amount::new(910));
        assert_eq!(balance(&bank, Y, TRADER), FUNDING + 90);
    }

    #[test]
    fn swap_rejections_leave_state_untouched() {
        let (mut pair, mut bank) = seeded(10_000, 10_000);
        let (pair_before, bank_before) = (pair.clone(), bank.clone());

        assert_eq!(
            pair.swap(&mut bank, SwapRequest::new(Amount::ZERO, Amount::ZERO, TRADER), 0),
            Err(AmmError::InsufficientOutputAmount)
        );
        assert_eq!(
            pair.swap(
                &mut bank,
                SwapRequest::new(Amount::new(10_000), Amount::ZERO, TRADER),
                0
            ),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(
            pair.swap(&mut bank, y_out(10, X), 0),
            Err(AmmError::InvalidRecipient)
        );
        assert_eq!(
            pair.swap(&mut bank, y_out(10, TRADER), 0),
            Err(AmmError::InsufficientInputAmount)
        );
        assert_eq!(pair, pair_before);
        assert_eq!(bank, bank_before);
    }

    // -- flash swaps ---------------------------------------------------------

    struct Repay {
        amount: u128,
        seen_data: Vec<u8>,
        reentry: Option<Result<()>>,
    }

    impl Repay {
        fn new(amount: u128) -> Self {
            Self {
                amount,
                seen_data: Vec::new(),
                reentry: None,
            }
        }
    }

    impl SwapCallee<AssetBank> for Repay {
        fn on_flash_swap(
            &mut self,
            pair: &mut ReservePair,
            book: &mut AssetBank,
            swap: FlashSwap<'_>,
        ) -> Result<()> {
            assert!(pair.is_locked());
            assert_eq!(swap.sender, TRADER);
            self.seen_data = swap.data.to_vec();
            self.reentry = Some(pair.sync(book, 0));
            book.transfer(Y, TRADER, pair.address(), Amount::new(self.amount))
        }
    }

    #[test]
    fn flash_swap_repaid_with_fee_succeeds() {
        let (mut pair, mut bank) = seeded(1_000_000, 1_000_000);
        let mut callee = Repay::new(1_004);
        let result = pair.flash_swap(
            &mut bank,
            TRADER,
            y_out(1_000, TRADER),
            &mut callee,
            b"hello",
            0,
        );
        assert_eq!(result, Ok(()));
        assert_eq!(callee.seen_data, b"hello");
        assert_eq!(pair.reserves().1, Amount::new(1_000_004));
        assert_eq!(balance(&bank, Y, TRADER), FUNDING - 4);
        assert!(!pair.is_locked());
    }

    #[test]
    fn flash_swap_repaid_without_fee_fails() {
        let (mut pair, mut bank) = seeded(1_000_000, 1_000_000);
        let (pair_before, bank_before) = (pair.clone(), bank.clone());
        let mut callee = Repay::new(1_003);
        let result = pair.flash_swap(
            &mut bank,
            TRADER,
            y_out(1_000, TRADER),
            &mut callee,
            &[],
            0,
        );
        assert_eq!(result, Err(AmmError::InvariantViolation));
        assert_eq!(pair, pair_before);
        assert_eq!(bank, bank_before);
    }

    #[test]
    fn reentrant_call_sees_locked_pair() {
        let (mut pair, mut bank) = seeded(1_000_000, 1_000_000);
        let mut callee = Repay::new(1_004);
        let Ok(()) = pair.flash_swap(
            &mut bank,
            TRADER,
            y_out(1_000, TRADER),
            &mut callee,
            &[],
            0,
        ) else {
            panic!("flash swap");
        };
        assert_eq!(callee.reentry, Some(Err(AmmError::Locked)));
    }

    // -- skim / sync ---------------------------------------------------------

    #[test]
    fn skim_returns_donations_and_sync_absorbs_them() {
        let (mut pair, mut bank) = seeded(10_000, 10_000);
        pay(&mut bank, X, TRADER, 500);
        assert_eq!(
            pair.skim(&mut bank, TRADER),
            Ok((Amount::new(500), Amount::ZERO))
        );
        assert_eq!(balance(&bank, X, TRADER), FUNDING);
        assert_eq!(pair.reserves().0, Amount::new(10_000));

        pay(&mut bank, X, TRADER, 500);
        assert_eq!(pair.sync(&mut bank, 5), Ok(()));
        assert_eq!(pair.reserves(), (Amount::new(10_500), Amount::new(10_000), 5));
    }

    #[test]
    fn balance_above_reserve_bound_is_rejected() {
        let (mut pair, mut bank) = seeded(10_000, 10_000);
        let Ok(()) = bank.mint(X, TRADER, ReservePair::MAX_RESERVE) else {
            panic!("mint");
        };
        pay(&mut bank, X, TRADER, ReservePair::MAX_RESERVE.get());
        let before = pair.clone();
        let Err(AmmError::ArithmeticOverflow(_)) = pair.sync(&mut bank, 1) else {
            panic!("expected ArithmeticOverflow");
        };
        assert_eq!(pair, before);
    }

    // -- accumulators --------------------------------------------------------

    #[test]
    fn accumulators_use_reserves_before_the_update() {
        let (mut pair, mut bank) = seeded(4_000, 1_000);
        assert_eq!(pair.price_x_cumulative(), U256::zero());

        let Ok(()) = pair.sync(&mut bank, 10) else {
            panic!("sync");
        };
        // x priced at 1/4 y, y at 4 x, for 10 seconds
        assert_eq!(pair.price_x_cumulative(), U256::from(10u8) << 110);
        assert_eq!(pair.price_y_cumulative(), U256::from(40u8) << 112);

        // same timestamp: nothing to credit
        let Ok(()) = pair.sync(&mut bank, 10) else {
            panic!("sync");
        };
        assert_eq!(pair.price_y_cumulative(), U256::from(40u8) << 112);

        let Ok(obs) = pair.observe(15) else {
            panic!("observe");
        };
        assert_eq!(obs.price_y_cumulative, U256::from(60u8) << 112);
        assert_eq!(pair.price_y_cumulative(), U256::from(40u8) << 112);
    }

    #[test]
    fn elapsed_time_survives_timestamp_wrap() {
        let mut pair = pair_with(PairConfig::default());
        let mut bank = funded_bank();
        pay(&mut bank, X, LP, 2_000);
        pay(&mut bank, Y, LP, 2_000);
        let Ok(_) = pair.mint(&mut bank, LP, None, (1 << 32) - 5) else {
            panic!("mint");
        };
        assert_eq!(pair.reserves().2, u32::MAX - 4);
        let Ok(()) = pair.sync(&mut bank, (1 << 32) + 5) else {
            panic!("sync");
        };
        assert_eq!(pair.reserves().2, 5);
        assert_eq!(pair.price_x_cumulative(), U256::from(10u8) << 112);
    }

    // -- protocol fee --------------------------------------------------------

    #[test]
    fn protocol_fee_takes_a_sixth_of_growth() {
        let (mut pair, mut bank) =
            seeded_with(PairConfig::default(), 1_000_000_000, 1_000_000_000, Some(FEE_TO));
        assert_eq!(pair.k_last(), U256::from(10u128.pow(18)));

        pay(&mut bank, X, TRADER, 500_000_000);
        let Ok(()) = pair.swap(&mut bank, y_out(332_665_999, TRADER), 0) else {
            panic!("swap");
        };
        // fee growth alone does not move k_last
        assert_eq!(pair.k_last(), U256::from(10u128.pow(18)));

        let Ok(()) = pair
            .shares_mut()
            .transfer(LP, POOL, Amount::new(100_000_000))
        else {
            panic!("share transfer");
        };
        assert_eq!(
            pair.burn(&mut bank, LP, Some(FEE_TO), 0),
            Ok((Amount::new(149_987_496), Amount::new(66_727_837)))
        );
        assert_eq!(pair.shares().shares_of(FEE_TO), Shares::new(83_361));
        assert_eq!(pair.k_last(), U256::from(810_825_831_379_474_656u128));
    }

    #[test]
    fn turning_the_fee_off_clears_k_last() {
        let (mut pair, mut bank) =
            seeded_with(PairConfig::default(), 1_000_000, 1_000_000, Some(FEE_TO));
        assert!(!pair.k_last().is_zero());
        pay(&mut bank, X, LP, 1_000);
        pay(&mut bank, Y, LP, 1_000);
        let Ok(_) = pair.mint(&mut bank, LP, None, 0) else {
            panic!("mint");
        };
        assert!(pair.k_last().is_zero());
        assert_eq!(pair.shares().shares_of(FEE_TO), Shares::ZERO);
    }
}
