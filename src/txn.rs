//! All-or-nothing execution.
//!
//! Every mutating entry point of the pair engine, the registry, and the
//! router runs inside [`scoped`] or [`atomically`]: the state a call can
//! touch is saved before the body runs and restored if it returns an
//! error.  A failed call therefore leaves reserves, share balances, and
//! the asset book exactly as they were.
//!
//! [`scoped`] saves only what the caller names (the pools and assets on a
//! route), so the cost of a call does not grow with unrelated pools or
//! assets.  [`atomically`] clones everything and is reserved for flash
//! swaps, whose callee may touch any asset.

/// State that can save and restore a named part of itself.
pub trait Checkpoint {
    /// Names the part to save.
    type Scope: ?Sized;
    /// What [`checkpoint`](Self::checkpoint) keeps.
    type Saved;

    /// Saves the part of `self` named by `scope`.
    fn checkpoint(&self, scope: &Self::Scope) -> Self::Saved;

    /// Restores a saved part.  Anything outside the saved scope is left
    /// as it is.
    fn rollback(&mut self, saved: Self::Saved);
}

/// Runs `body`, restoring the named parts of `state` and `book` on error.
///
/// The body must not write outside `touched` and `assets`; those writes
/// would survive a rollback.
///
/// # Errors
///
/// Propagates whatever `body` returns.
///
/// # Examples
///
/// ```
/// use pairswap::config::{PairConfig, RegistryConfig};
/// use pairswap::domain::{Address, Amount};
/// use pairswap::error::AmmError;
/// use pairswap::factory::PairRegistry;
/// use pairswap::ledger::AssetBank;
/// use pairswap::traits::AssetBook;
/// use pairswap::txn::scoped;
///
/// let (usdc, weth) = (Address::repeat(1), Address::repeat(2));
/// let (alice, bob) = (Address::repeat(0xa1), Address::repeat(0xb0));
/// let config = RegistryConfig::new(Address::repeat(0xfa), alice, PairConfig::default())
///     .expect("valid config");
/// let mut registry = PairRegistry::new(config);
/// let mut bank: AssetBank = AssetBank::new();
/// bank.mint(usdc, alice, Amount::new(10)).expect("mint");
///
/// let no_pools: &[Address] = &[];
/// let result: Result<(), AmmError> =
///     scoped(&mut registry, no_pools, &mut bank, [usdc].as_slice(), |r, b| {
///         r.create_pool(usdc, weth)?;
///         b.transfer(usdc, alice, bob, Amount::new(4))?;
///         Err(AmmError::Locked)
///     });
/// assert!(result.is_err());
/// assert_eq!(registry.pool_count(), 0);
/// assert_eq!(bank.balance_of(usdc, alice), Ok(Amount::new(10)));
/// ```
pub fn scoped<S, B, T, E, F>(
    state: &mut S,
    touched: &S::Scope,
    book: &mut B,
    assets: &B::Scope,
    body: F,
) -> Result<T, E>
where
    S: Checkpoint,
    B: Checkpoint,
    F: FnOnce(&mut S, &mut B) -> Result<T, E>,
{
    let state_before = state.checkpoint(touched);
    let book_before = book.checkpoint(assets);
    let out = body(state, book);
    if out.is_err() {
        state.rollback(state_before);
        book.rollback(book_before);
    }
    out
}

/// Runs `body` against `state` and `book`, rolling both back on error.
///
/// The snapshot is a full `Clone` of each argument, taken once per call.
///
/// # Errors
///
/// Propagates whatever `body` returns.
///
/// # Examples
///
/// ```
/// use pairswap::error::AmmError;
/// use pairswap::txn::atomically;
///
/// let mut counter = 1u32;
/// let mut log = vec!["start"];
/// let result: Result<(), AmmError> = atomically(&mut counter, &mut log, |c, l| {
///     *c += 1;
///     l.push("bumped");
///     Err(AmmError::Locked)
/// });
/// assert!(result.is_err());
/// assert_eq!(counter, 1);
/// assert_eq!(log, ["start"]);
/// ```
pub fn atomically<S, B, T, E, F>(state: &mut S, book: &mut B, body: F) -> Result<T, E>
where
    S: Clone,
    B: Clone,
    F: FnOnce(&mut S, &mut B) -> Result<T, E>,
{
    let state_before = state.clone();
    let book_before = book.clone();
    let out = body(state, book);
    if out.is_err() {
        *state = state_before;
        *book = book_before;
    }
    out
}
