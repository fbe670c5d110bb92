//! Dedup ledger and its storage backends.
//!
//! Available backends:
//! - `FileLedgerStore` - JSON file, atomically replaced on save
//! - `MemoryLedgerStore` - In-memory storage (testing)

pub mod file;
pub mod ledger;
pub mod memory;

pub use file::{write_atomic, FileLedgerStore};
pub use ledger::{identity_key, job_key, DedupLedger};
pub use memory::MemoryLedgerStore;
