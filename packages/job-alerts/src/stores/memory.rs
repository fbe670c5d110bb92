//! In-memory ledger storage for testing and development.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::LedgerResult;
use crate::stores::ledger::DedupLedger;
use crate::traits::store::LedgerStore;

/// Ledger store that lives only as long as the process.
///
/// Clones share the same underlying ledger, so a test can hand one clone to
/// the code under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    ledger: Arc<RwLock<DedupLedger>>,
    saves: Arc<RwLock<usize>>,
}

impl MemoryLedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a ledger.
    pub fn with_ledger(ledger: DedupLedger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            saves: Arc::default(),
        }
    }

    /// Current stored ledger.
    pub fn snapshot(&self) -> DedupLedger {
        self.ledger.read().unwrap().clone()
    }

    /// Number of times `save` was called.
    pub fn save_count(&self) -> usize {
        *self.saves.read().unwrap()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load(&self) -> LedgerResult<DedupLedger> {
        Ok(self.ledger.read().unwrap().clone())
    }

    async fn save(&self, ledger: &DedupLedger) -> LedgerResult<()> {
        *self.ledger.write().unwrap() = ledger.clone();
        *self.saves.write().unwrap() += 1;
        Ok(())
    }
}
