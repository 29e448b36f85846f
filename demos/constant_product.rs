//! Constant-product pool walkthrough.
//!
//! Opens a USDC/WETH pool through the router, trades against it, turns
//! on the protocol fee, reads a time-weighted price, and withdraws.
//!
//! # Run
//!
//! ```bash
//! cargo run --example constant_product
//! ```

use pairswap::prelude::*;
use pairswap::router::library;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Constant Product AMM (x · y ≥ k) ===\n");

    // ── 1. Identities ───────────────────────────────────────────────────
    let usdc = Address::repeat(1);
    let weth = Address::repeat(2);
    let admin = Address::repeat(0xad);
    let alice = Address::repeat(0xa1);
    let bob = Address::repeat(0xb0);
    let treasury = Address::repeat(0xfe);
    let router = Router::new(Address::repeat(0x70));

    // ── 2. Registry with the reference parameters ───────────────────────
    let config = RegistryConfig::new(Address::repeat(0xfa), admin, PairConfig::default())?;
    let mut registry = PairRegistry::new(config);
    println!("Registry:     {}", registry.address());
    println!("Template:     {}", registry.template_fingerprint());
    println!("Swap fee:     {}", registry.pair_config().swap_fee());
    registry.set_fee_recipient(admin, treasury)?;

    // ── 3. Fund users and approve the router ────────────────────────────
    let mut bank: AssetBank = AssetBank::new();
    for user in [alice, bob] {
        for asset in [usdc, weth] {
            bank.mint(asset, user, Amount::new(100_000_000))?;
            bank.approve(asset, user, router.address(), Amount::MAX)?;
        }
    }

    // ── 4. Alice opens the pool at 4 000 USDC per 1 000 WETH ────────────
    let added = router.add_liquidity(
        &mut registry,
        &mut bank,
        alice,
        &AddLiquidity {
            asset_a: usdc,
            asset_b: weth,
            amount_a_desired: Amount::new(40_000_000),
            amount_b_desired: Amount::new(10_000_000),
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice,
            deadline: 600,
        },
        0,
    )?;
    println!("\n--- Add Liquidity ---");
    println!("  Pool:        {}", added.pool);
    println!("  Deposited:   {} USDC + {} WETH", added.amount_a, added.amount_b);
    println!("  Shares:      {}", added.shares);
    println!("  Locked:      {MINIMUM_LIQUIDITY}");
    let start = registry.pair(added.pool)?.observe(0)?;

    // ── 5. Bob sells 1 000 000 USDC ─────────────────────────────────────
    let path = SwapPath::new(vec![usdc, weth])?;
    let quoted = router.get_amounts_out(&registry, Amount::new(1_000_000), &path)?;
    let amounts = router.swap_exact_tokens_for_tokens(
        &mut registry,
        &mut bank,
        bob,
        &ExactInput {
            amount_in: Amount::new(1_000_000),
            amount_out_min: quoted[1],
            path: path.clone(),
            to: bob,
            deadline: 600,
        },
        60,
    )?;
    println!("\n--- Swap: sell {} USDC ---", amounts[0]);
    println!("  Amount out:  {} WETH", amounts[1]);
    let (reserve_usdc, reserve_weth) = library::reserves_for(&registry, usdc, weth)?;
    println!("  Reserves:    {reserve_usdc} USDC / {reserve_weth} WETH");

    // ── 6. Bob buys back exactly 100 000 USDC ───────────────────────────
    let back = SwapPath::new(vec![weth, usdc])?;
    let amounts = router.swap_tokens_for_exact_tokens(
        &mut registry,
        &mut bank,
        bob,
        &ExactOutput {
            amount_out: Amount::new(100_000),
            amount_in_max: Amount::new(30_000),
            path: back,
            to: bob,
            deadline: 600,
        },
        120,
    )?;
    println!("\n--- Swap: buy {} USDC ---", amounts[1]);
    println!("  Amount in:   {} WETH", amounts[0]);

    // ── 7. Time-weighted average over the first two minutes ─────────────
    let end = registry.pair(added.pool)?.observe(120)?;
    let average = end.average_since(&start)?;
    println!("\n--- Oracle ---");
    println!("  TWAP WETH/USDC: {}", average.price_x);
    println!("  TWAP USDC/WETH: {}", average.price_y);

    // ── 8. Alice withdraws half her shares ──────────────────────────────
    let half = Shares::new(added.shares.get() / 2);
    registry
        .pair_mut(added.pool)?
        .shares_mut()
        .approve(alice, router.address(), half.as_amount())?;
    let removed = router.remove_liquidity(
        &mut registry,
        &mut bank,
        alice,
        &RemoveLiquidity {
            asset_a: usdc,
            asset_b: weth,
            shares: half,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice,
            deadline: 600,
        },
        180,
    )?;
    println!("\n--- Remove Liquidity ---");
    println!("  Burned:      {half}");
    println!("  Returned:    {} USDC + {} WETH", removed.amount_a, removed.amount_b);

    let pair = registry.pair(added.pool)?;
    println!("  Treasury:    {} shares", pair.shares().shares_of(treasury));
    println!("  Total:       {} shares", pair.total_shares());

    println!("\n=== Done ===");
    Ok(())
}
