//! Property-based tests for the pair engine and the pricing library.
//!
//! 1. **Round trip**: A→B→A never returns more than was sold.
//! 2. **k never falls**: `r_x · r_y` is non-decreasing over swaps.
//! 3. **Exact-out is minimal**: `get_amount_in` buys at least the
//!    target, and one unit less does not.
//! 4. **Liquidity conservation**: add then remove never returns more
//!    than was deposited.
//! 5. **Share accounting**: holders' shares always sum to the total.

use primitive_types::U256;
use proptest::prelude::*;

use super::{ReservePair, SwapRequest};
use crate::config::PairConfig;
use crate::domain::{Address, Amount, AssetPair, FeeRate, Shares};
use crate::ledger::AssetBank;
use crate::math::wide;
use crate::router::library::{get_amount_in, get_amount_out};
use crate::traits::{AssetBook, FungibleAsset};

const X: Address = Address::repeat(1);
const Y: Address = Address::repeat(2);
const POOL: Address = Address::repeat(0x50);
const LP: Address = Address::repeat(0xa1);
const TRADER: Address = Address::repeat(0xb0);
const FUNDING: u128 = 1 << 100;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn seeded(reserve_x: u128, reserve_y: u128) -> (ReservePair, AssetBank) {
    let Ok(assets) = AssetPair::new(X, Y) else {
        panic!("valid pair");
    };
    let mut pair = ReservePair::new(POOL, Address::repeat(0xfa), assets, PairConfig::default());
    let mut bank: AssetBank = AssetBank::new();
    for holder in [LP, TRADER] {
        for asset in [X, Y] {
            let Ok(()) = bank.mint(asset, holder, Amount::new(FUNDING)) else {
                panic!("mint");
            };
        }
    }
    deposit(&mut bank, LP, reserve_x, reserve_y);
    let Ok(_) = pair.mint(&mut bank, LP, None, 0) else {
        panic!("initial mint");
    };
    (pair, bank)
}

fn deposit(bank: &mut AssetBank, from: Address, x: u128, y: u128) {
    let (Ok(()), Ok(())) = (
        bank.transfer(X, from, POOL, Amount::new(x)),
        bank.transfer(Y, from, POOL, Amount::new(y)),
    ) else {
        panic!("deposit");
    };
}

fn k(pair: &ReservePair) -> U256 {
    let (rx, ry, _) = pair.reserves();
    wide::product(rx.get(), ry.get())
}

/// Sells `amount_in` of `asset_in` at the quoted price.  Returns the
/// output, or `None` if the trade is too small to quote.
fn sell(
    pair: &mut ReservePair,
    bank: &mut AssetBank,
    asset_in: Address,
    amount_in: u128,
) -> Option<Amount> {
    let Ok((reserve_in, reserve_out)) = pair.reserves_for(asset_in) else {
        panic!("asset in pair");
    };
    let amount_out = get_amount_out(
        Amount::new(amount_in),
        reserve_in,
        reserve_out,
        FeeRate::REFERENCE,
    )
    .ok()?;
    let Ok(()) = bank.transfer(asset_in, TRADER, POOL, Amount::new(amount_in)) else {
        panic!("pay in");
    };
    let Ok(asset_out) = pair.assets().other(&asset_in) else {
        panic!("asset in pair");
    };
    let Ok(request) = SwapRequest::single(&pair.assets(), asset_out, amount_out, TRADER) else {
        panic!("request");
    };
    let Ok(()) = pair.swap(bank, request, 0) else {
        panic!("quoted swap must succeed");
    };
    Some(amount_out)
}

// ---------------------------------------------------------------------------
// Property 1: round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses(
        rx in 10_000u128..=10_000_000_000u128,
        ry in 10_000u128..=10_000_000_000u128,
        amount in 1_000u128..=1_000_000u128,
    ) {
        let (mut pair, mut bank) = seeded(rx, ry);
        let Some(mid) = sell(&mut pair, &mut bank, X, amount) else {
            return Ok(());
        };
        let Some(back) = sell(&mut pair, &mut bank, Y, mid.get()) else {
            return Ok(());
        };
        prop_assert!(back.get() <= amount, "round trip {} -> {} -> {}", amount, mid, back);
    }
}

// ---------------------------------------------------------------------------
// Property 2: k never falls
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_non_decreasing(
        rx in 10_000u128..=10_000_000_000u128,
        ry in 10_000u128..=10_000_000_000u128,
        trades in proptest::collection::vec((any::<bool>(), 1u128..=5_000_000u128), 1..8),
    ) {
        let (mut pair, mut bank) = seeded(rx, ry);
        let mut last = k(&pair);
        for (x_in, amount) in trades {
            let asset = if x_in { X } else { Y };
            if sell(&mut pair, &mut bank, asset, amount).is_none() {
                continue;
            }
            let now = k(&pair);
            prop_assert!(now >= last, "k fell from {} to {}", last, now);
            last = now;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: exact-out quotes are minimal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_amount_in_is_minimal(
        r_in in 1_000u128..=1_000_000_000_000u128,
        r_out in 1_000u128..=1_000_000_000_000u128,
        pct in 1u128..=90u128,
        fee_num in 0u32..=100u32,
    ) {
        let Ok(fee) = FeeRate::new(fee_num, 1_000) else {
            return Ok(());
        };
        let target = Amount::new((r_out * pct / 100).max(1));
        let (reserve_in, reserve_out) = (Amount::new(r_in), Amount::new(r_out));
        let Ok(needed) = get_amount_in(target, reserve_in, reserve_out, fee) else {
            return Ok(());
        };
        let Ok(bought) = get_amount_out(needed, reserve_in, reserve_out, fee) else {
            panic!("input of a valid exact-out quote must price");
        };
        prop_assert!(bought >= target);
        if needed.get() > 1 {
            let less = get_amount_out(Amount::new(needed.get() - 1), reserve_in, reserve_out, fee);
            prop_assert!(less.map_or(true, |out| out < target));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4 & 5: liquidity conservation and share accounting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_never_profits(
        rx in 10_000u128..=10_000_000_000u128,
        ry in 10_000u128..=10_000_000_000u128,
        dx in 1_000u128..=1_000_000_000u128,
        dy in 1_000u128..=1_000_000_000u128,
    ) {
        let (mut pair, mut bank) = seeded(rx, ry);
        deposit(&mut bank, TRADER, dx, dy);
        let Ok(minted) = pair.mint(&mut bank, TRADER, None, 0) else {
            return Ok(());
        };
        let Ok(()) = pair.shares_mut().transfer(TRADER, POOL, minted.as_amount()) else {
            panic!("share transfer");
        };
        let Ok((out_x, out_y)) = pair.burn(&mut bank, TRADER, None, 0) else {
            return Ok(());
        };
        prop_assert!(out_x.get() <= dx, "x: deposited {}, got {}", dx, out_x);
        prop_assert!(out_y.get() <= dy, "y: deposited {}, got {}", dy, out_y);
    }

    #[test]
    fn prop_shares_sum_to_total(
        rx in 10_000u128..=10_000_000_000u128,
        ry in 10_000u128..=10_000_000_000u128,
        deposits in proptest::collection::vec(
            (1_000u128..=1_000_000u128, 1_000u128..=1_000_000u128),
            0..5,
        ),
        burn_pct in 0u128..=100u128,
    ) {
        let (mut pair, mut bank) = seeded(rx, ry);
        for (dx, dy) in deposits {
            deposit(&mut bank, TRADER, dx, dy);
            let _ = pair.mint(&mut bank, TRADER, None, 0);
        }
        let held = pair.shares().shares_of(LP).get() * burn_pct / 100;
        if held > 0 {
            let Ok(()) = pair.shares_mut().transfer(LP, POOL, Amount::new(held)) else {
                panic!("share transfer");
            };
            let _ = pair.burn(&mut bank, LP, None, 0);
        }
        let sum = pair
            .shares()
            .holders()
            .fold(0u128, |acc, (_, s)| acc + s.get());
        prop_assert_eq!(Shares::new(sum), pair.total_shares());
        prop_assert!(pair.shares().shares_of(Address::zero()) == Shares::new(1_000));
        // deposits too small to mint stay behind as donations
        let (rx_now, ry_now, _) = pair.reserves();
        let (Ok(bx), Ok(by)) = (bank.balance_of(X, POOL), bank.balance_of(Y, POOL)) else {
            panic!("known assets");
        };
        prop_assert!(rx_now <= bx && ry_now <= by);
    }
}
