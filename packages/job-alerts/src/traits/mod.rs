//! Core trait abstractions.

pub mod adapter;
pub mod store;

pub use adapter::SourceAdapter;
pub use store::LedgerStore;
