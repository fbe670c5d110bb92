//! Ledger storage trait.
//!
//! The ledger is read once when a run starts and written once when it ends.
//! Concurrent runs against the same store are not coordinated; the last
//! writer wins.

use async_trait::async_trait;

use crate::error::LedgerResult;
use crate::stores::ledger::DedupLedger;

/// Durable home for the dedup ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the ledger. A store that has never been written yields an empty ledger.
    async fn load(&self) -> LedgerResult<DedupLedger>;

    /// Replace the stored ledger with `ledger` in full.
    async fn save(&self, ledger: &DedupLedger) -> LedgerResult<()>;
}
