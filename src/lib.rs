//! # pairswap
//!
//! Constant-product AMM (Uniswap V2 style): a pair engine, a registry that
//! gives every asset pair exactly one pool at a deterministic address, and
//! a router for slippage-bounded deposits, withdrawals, and multi-hop
//! swaps.
//!
//! The crate moves no value of its own.  Assets live in an [`AssetBook`]
//! supplied by the host; pools hold their reserves in that book under
//! their own address and credit whatever arrived since their last update.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` on identifiers, amounts, and configuration |
//! | `fixed-point` | no | Converts UQ112x112 averages to `fixed::types::U64F64` |
//!
//! # Quick Start
//!
//! ```rust
//! use pairswap::prelude::*;
//!
//! let usdc = Address::repeat(1);
//! let weth = Address::repeat(2);
//! let (alice, bob) = (Address::repeat(0xa1), Address::repeat(0xb0));
//!
//! // 1. A registry and a router
//! let config = RegistryConfig::new(Address::repeat(0xfa), alice, PairConfig::default())
//!     .expect("valid config");
//! let mut registry = PairRegistry::new(config);
//! let router = Router::new(Address::repeat(0x70));
//!
//! // 2. An in-memory asset book; both users let the router spend for them
//! let mut bank: AssetBank = AssetBank::new();
//! for user in [alice, bob] {
//!     for asset in [usdc, weth] {
//!         bank.mint(asset, user, Amount::new(10_000_000)).expect("mint");
//!         bank.approve(asset, user, router.address(), Amount::MAX).expect("approve");
//!     }
//! }
//!
//! // 3. Alice opens the pool
//! let added = router
//!     .add_liquidity(
//!         &mut registry,
//!         &mut bank,
//!         alice,
//!         &AddLiquidity {
//!             asset_a: usdc,
//!             asset_b: weth,
//!             amount_a_desired: Amount::new(4_000_000),
//!             amount_b_desired: Amount::new(1_000_000),
//!             amount_a_min: Amount::ZERO,
//!             amount_b_min: Amount::ZERO,
//!             to: alice,
//!             deadline: 60,
//!         },
//!         0,
//!     )
//!     .expect("deposit");
//! assert_eq!(registry.get_pool(weth, usdc), Some(added.pool));
//!
//! // 4. Bob sells 10 000 USDC for WETH
//! let path = SwapPath::new(vec![usdc, weth]).expect("two assets");
//! let amounts = router
//!     .swap_exact_tokens_for_tokens(
//!         &mut registry,
//!         &mut bank,
//!         bob,
//!         &ExactInput {
//!             amount_in: Amount::new(10_000),
//!             amount_out_min: Amount::new(2_400),
//!             path,
//!             to: bob,
//!             deadline: 60,
//!         },
//!         1,
//!     )
//!     .expect("swap");
//! assert_eq!(amounts[1], Amount::new(2_486));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  deadlines, slippage bounds, path chaining
//! └──────┬──────┘
//!        │ transfer_from + pair calls
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  one pool per pair, fee recipient, address derivation
//! └──────┬──────┘
//!        │ owns
//!        ▼
//! ┌─────────────┐
//! │ ReservePair  │  mint / burn / swap / flash swap / sync / skim
//! └──────┬──────┘
//!        │ balance_of / transfer
//!        ▼
//! ┌─────────────┐
//! │  AssetBook   │  host-supplied fungible asset ledgers
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares), etc. |
//! | [`traits`] | Collaborator interfaces: [`FungibleAsset`](traits::FungibleAsset), [`AssetBook`](traits::AssetBook), [`SwapCallee`](traits::SwapCallee) |
//! | [`config`] | Validated parameters: [`PairConfig`](config::PairConfig), [`RegistryConfig`](config::RegistryConfig) |
//! | [`pair`] | The [`ReservePair`](pair::ReservePair) engine and price [`oracle`](pair::oracle) |
//! | [`factory`] | [`PairRegistry`](factory::PairRegistry) and deterministic [`derive`](factory::derive)ation |
//! | [`router`] | [`Router`](router::Router) and the pricing [`library`](router::library) |
//! | [`ledger`] | In-memory ledgers: [`TokenLedger`](ledger::TokenLedger), [`AssetBank`](ledger::AssetBank), [`PoolShareLedger`](ledger::PoolShareLedger) |
//! | [`math`] | Checked arithmetic, 256-bit helpers, UQ112x112 |
//! | [`txn`] | All-or-nothing execution |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! [`AssetBook`]: traits::AssetBook

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod router;
pub mod traits;
pub mod txn;
