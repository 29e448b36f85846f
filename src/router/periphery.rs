//! User-facing entry points over the registry's pools.

use tracing::{debug, info};

use super::library::{self, pair_for};
use super::params::{
    AddLiquidity, ExactInput, ExactOutput, LiquidityAdded, LiquidityRemoved, RemoveLiquidity,
};
use crate::domain::{Address, Amount, SwapPath, Timestamp};
use crate::error::{AmmError, Result};
use crate::factory::PairRegistry;
use crate::pair::SwapRequest;
use crate::traits::{AssetBook, FungibleAsset};
use crate::txn;

/// Adds and removes liquidity and routes swaps with slippage bounds.
///
/// The router holds no state beyond its identity.  It pulls the caller's
/// assets and shares with `transfer_from`, so the caller must first
/// approve the router's [`address`](Self::address) on the asset book and,
/// for removals, on the pool's share ledger.
///
/// Every call is all-or-nothing: on any error the registry (pools and
/// share ledgers included) and the asset book are left exactly as they
/// were.  Only the pools and assets a call names are saved for that, so
/// its cost does not depend on how many other pools or assets exist.
///
/// # Example
///
/// ```rust
/// use pairswap::prelude::*;
///
/// let (usdc, weth, alice) = (Address::repeat(1), Address::repeat(2), Address::repeat(0xa1));
/// let router = Router::new(Address::repeat(0x70));
/// let config = RegistryConfig::new(Address::repeat(0xfa), alice, PairConfig::default())
///     .expect("valid config");
/// let mut registry = PairRegistry::new(config);
/// let mut bank: AssetBank = AssetBank::new();
/// for asset in [usdc, weth] {
///     bank.mint(asset, alice, Amount::new(1_000_000)).expect("mint");
///     bank.approve(asset, alice, router.address(), Amount::MAX).expect("approve");
/// }
///
/// let added = router
///     .add_liquidity(
///         &mut registry,
///         &mut bank,
///         alice,
///         &AddLiquidity {
///             asset_a: usdc,
///             asset_b: weth,
///             amount_a_desired: Amount::new(400_000),
///             amount_b_desired: Amount::new(100_000),
///             amount_a_min: Amount::ZERO,
///             amount_b_min: Amount::ZERO,
///             to: alice,
///             deadline: 10,
///         },
///         0,
///     )
///     .expect("first deposit");
/// assert_eq!(added.shares, Shares::new(199_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Router {
    address: Address,
}

impl Router {
    /// Creates a router acting as `address`.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the identity the router spends allowances as.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    // -- liquidity ----------------------------------------------------------

    /// Deposits into a pool at its current ratio, creating it if needed.
    ///
    /// An empty pool takes both desired amounts as given.  Otherwise the
    /// router deposits the largest amounts at the pool's ratio that fit
    /// within the desired amounts.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `now > deadline`.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if the deposit falls below a minimum.
    /// - Pool creation, allowance, balance, and mint errors.
    pub fn add_liquidity<B: AssetBook>(
        &self,
        registry: &mut PairRegistry,
        book: &mut B,
        caller: Address,
        params: &AddLiquidity,
        now: Timestamp,
    ) -> Result<LiquidityAdded> {
        ensure_live(params.deadline, now)?;
        let existing: Vec<Address> = registry
            .get_pool(params.asset_a, params.asset_b)
            .into_iter()
            .collect();
        let assets = [params.asset_a, params.asset_b];
        txn::scoped(registry, existing.as_slice(), book, assets.as_slice(), |registry, book| {
            let pool = match registry.get_pool(params.asset_a, params.asset_b) {
                Some(pool) => pool,
                None => registry.create_pool(params.asset_a, params.asset_b)?,
            };
            let (reserve_a, reserve_b) =
                library::reserves_for(registry, params.asset_a, params.asset_b)?;
            let (amount_a, amount_b) = deposit_amounts(params, reserve_a, reserve_b)?;

            book.transfer_from(params.asset_a, self.address, caller, pool, amount_a)?;
            book.transfer_from(params.asset_b, self.address, caller, pool, amount_b)?;
            let shares = registry.mint_nested(pool, book, params.to, now)?;
            info!(%caller, %pool, %amount_a, %amount_b, %shares, "router deposit");
            Ok(LiquidityAdded {
                pool,
                amount_a,
                amount_b,
                shares,
            })
        })
    }

    /// Redeems the caller's shares for both assets.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `now > deadline`.
    /// - [`AmmError::PoolNotFound`] if the pair has no pool.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if a payout falls below its minimum.
    /// - Share allowance, share balance, and burn errors.
    pub fn remove_liquidity<B: AssetBook>(
        &self,
        registry: &mut PairRegistry,
        book: &mut B,
        caller: Address,
        params: &RemoveLiquidity,
        now: Timestamp,
    ) -> Result<LiquidityRemoved> {
        ensure_live(params.deadline, now)?;
        let pool = pair_for(registry, params.asset_a, params.asset_b)?;
        let assets = [params.asset_a, params.asset_b];
        txn::scoped(registry, [pool].as_slice(), book, assets.as_slice(), |registry, book| {
            let pair = registry.pair_mut(pool)?;
            let asset_a_is_x = pair.asset_x() == params.asset_a;
            pair.shares_mut().transfer_from(
                self.address,
                caller,
                pool,
                params.shares.as_amount(),
            )?;

            let (amount_x, amount_y) = registry.burn_nested(pool, book, params.to, now)?;
            let (amount_a, amount_b) = if asset_a_is_x {
                (amount_x, amount_y)
            } else {
                (amount_y, amount_x)
            };
            if amount_a < params.amount_a_min {
                return Err(AmmError::InsufficientAAmount);
            }
            if amount_b < params.amount_b_min {
                return Err(AmmError::InsufficientBAmount);
            }
            info!(
                %caller,
                %pool,
                %amount_a,
                %amount_b,
                shares = %params.shares,
                "router withdrawal"
            );
            Ok(LiquidityRemoved { amount_a, amount_b })
        })
    }

    // -- swaps --------------------------------------------------------------

    /// Sells exactly `amount_in` along `path`.
    ///
    /// Returns the amount at every step of the path.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `now > deadline`.
    /// - [`AmmError::InsufficientOutputAmount`] if the final output is
    ///   below `amount_out_min`.
    /// - [`AmmError::PoolNotFound`] if a hop has no pool.
    /// - Pricing, allowance, balance, and swap errors.
    pub fn swap_exact_tokens_for_tokens<B: AssetBook>(
        &self,
        registry: &mut PairRegistry,
        book: &mut B,
        caller: Address,
        params: &ExactInput,
        now: Timestamp,
    ) -> Result<Vec<Amount>> {
        ensure_live(params.deadline, now)?;
        let amounts = library::get_amounts_out(registry, params.amount_in, &params.path)?;
        let amount_out = amounts.last().copied().unwrap_or(Amount::ZERO);
        if amount_out < params.amount_out_min {
            return Err(AmmError::InsufficientOutputAmount);
        }
        self.execute(registry, book, caller, &amounts, &params.path, params.to, now)?;
        Ok(amounts)
    }

    /// Buys exactly `amount_out` along `path`.
    ///
    /// Returns the amount at every step of the path.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `now > deadline`.
    /// - [`AmmError::ExcessiveInputAmount`] if the required input exceeds
    ///   `amount_in_max`.
    /// - [`AmmError::PoolNotFound`] if a hop has no pool.
    /// - Pricing, allowance, balance, and swap errors.
    pub fn swap_tokens_for_exact_tokens<B: AssetBook>(
        &self,
        registry: &mut PairRegistry,
        book: &mut B,
        caller: Address,
        params: &ExactOutput,
        now: Timestamp,
    ) -> Result<Vec<Amount>> {
        ensure_live(params.deadline, now)?;
        let amounts = library::get_amounts_in(registry, params.amount_out, &params.path)?;
        let amount_in = amounts.first().copied().unwrap_or(Amount::MAX);
        if amount_in > params.amount_in_max {
            return Err(AmmError::ExcessiveInputAmount);
        }
        self.execute(registry, book, caller, &amounts, &params.path, params.to, now)?;
        Ok(amounts)
    }

    /// Quotes an exact-in route without executing it.
    ///
    /// # Errors
    ///
    /// As [`library::get_amounts_out`].
    pub fn get_amounts_out(
        &self,
        registry: &PairRegistry,
        amount_in: Amount,
        path: &SwapPath,
    ) -> Result<Vec<Amount>> {
        library::get_amounts_out(registry, amount_in, path)
    }

    /// Quotes an exact-out route without executing it.
    ///
    /// # Errors
    ///
    /// As [`library::get_amounts_in`].
    pub fn get_amounts_in(
        &self,
        registry: &PairRegistry,
        amount_out: Amount,
        path: &SwapPath,
    ) -> Result<Vec<Amount>> {
        library::get_amounts_in(registry, amount_out, path)
    }

    /// Pulls the input into the first pool, then swaps hop by hop, each
    /// pool paying the next one and the last paying `to`.
    #[allow(clippy::too_many_arguments)]
    fn execute<B: AssetBook>(
        &self,
        registry: &mut PairRegistry,
        book: &mut B,
        caller: Address,
        amounts: &[Amount],
        path: &SwapPath,
        to: Address,
        now: Timestamp,
    ) -> Result<()> {
        let pools = path
            .hops()
            .map(|(input, output)| pair_for(registry, input, output))
            .collect::<Result<Vec<_>>>()?;
        let (Some(&first_pool), Some(&amount_in), Some(&amount_out)) =
            (pools.first(), amounts.first(), amounts.last())
        else {
            return Err(AmmError::InvalidPath);
        };
        if amounts.len() != path.len() {
            return Err(AmmError::InvalidPath);
        }

        txn::scoped(registry, pools.as_slice(), book, path.as_slice(), |registry, book| {
            book.transfer_from(path.first(), self.address, caller, first_pool, amount_in)?;

            for (i, (_, output)) in path.hops().enumerate() {
                let recipient = pools.get(i + 1).copied().unwrap_or(to);
                let pair = registry.pair_mut(pools[i])?;
                let request =
                    SwapRequest::single(&pair.assets(), output, amounts[i + 1], recipient)?;
                pair.swap_nested(book, request, now)?;
            }
            debug!(
                %caller,
                %to,
                hops = pools.len(),
                %amount_in,
                %amount_out,
                "routed swap"
            );
            Ok(())
        })
    }
}

fn ensure_live(deadline: Timestamp, now: Timestamp) -> Result<()> {
    if now > deadline {
        return Err(AmmError::Expired);
    }
    Ok(())
}

/// Amounts to deposit: the desired pair for an empty pool, else the
/// largest pair at the pool's ratio within the desired amounts.
fn deposit_amounts(
    params: &AddLiquidity,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<(Amount, Amount)> {
    let (amount_a, amount_b) = if reserve_a.is_zero() && reserve_b.is_zero() {
        (params.amount_a_desired, params.amount_b_desired)
    } else {
        let b_optimal = library::quote(params.amount_a_desired, reserve_a, reserve_b)?;
        if b_optimal <= params.amount_b_desired {
            (params.amount_a_desired, b_optimal)
        } else {
            let a_optimal = library::quote(params.amount_b_desired, reserve_b, reserve_a)?;
            (a_optimal, params.amount_b_desired)
        }
    };
    if amount_a < params.amount_a_min {
        return Err(AmmError::InsufficientAAmount);
    }
    if amount_b < params.amount_b_min {
        return Err(AmmError::InsufficientBAmount);
    }
    Ok((amount_a, amount_b))
}
