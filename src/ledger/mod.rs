//! In-memory ledgers: a plain token ledger, a multi-asset book, and the
//! pool share ledger every [`ReservePair`](crate::pair::ReservePair) owns.

mod asset_bank;
mod pool_shares;
mod token_ledger;

pub use asset_bank::AssetBank;
pub use pool_shares::PoolShareLedger;
pub use token_ledger::TokenLedger;
