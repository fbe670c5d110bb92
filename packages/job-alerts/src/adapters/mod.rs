//! Source adapter implementations.
//!
//! # Available Adapters
//!
//! - [`GreenhouseAdapter`] - Greenhouse job board API
//! - [`LeverAdapter`] - Lever postings API
//! - [`AshbyAdapter`] - Ashby posting API
//! - [`CustomPortalAdapter`] - Placeholder for custom portals (yields nothing)
//! - [`MockAdapter`] - Canned responses for testing
//!
//! [`AdapterSet`] maps each provider to the adapter that serves it.

pub mod ashby;
pub mod custom;
mod fields;
pub mod greenhouse;
pub mod http;
pub mod lever;
pub mod mock;

pub use ashby::{parse_ashby, AshbyAdapter};
pub use custom::CustomPortalAdapter;
pub use greenhouse::{parse_greenhouse, GreenhouseAdapter};
pub use http::JsonClient;
pub use lever::{parse_lever, LeverAdapter};
pub use mock::MockAdapter;

use std::collections::HashMap;

use crate::traits::adapter::SourceAdapter;
use crate::types::job::Source;

/// Provider to adapter mapping used by the pipeline.
#[derive(Default)]
pub struct AdapterSet {
    adapters: HashMap<Source, Box<dyn SourceAdapter>>,
}

impl AdapterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The production wiring: real HTTP adapters plus the custom portal placeholder.
    pub fn http() -> Self {
        Self::new()
            .with(GreenhouseAdapter::new())
            .with(LeverAdapter::new())
            .with(AshbyAdapter::new())
            .with(CustomPortalAdapter::new())
    }

    /// Register an adapter under its own kind, replacing any previous one.
    pub fn with(mut self, adapter: impl SourceAdapter + 'static) -> Self {
        self.insert(adapter);
        self
    }

    pub fn insert(&mut self, adapter: impl SourceAdapter + 'static) {
        self.adapters.insert(adapter.kind(), Box::new(adapter));
    }

    /// Adapter for a provider, if registered.
    pub fn get(&self, kind: Source) -> Option<&dyn SourceAdapter> {
        self.adapters.get(&kind).map(|a| a.as_ref())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_set_covers_every_provider() {
        let set = AdapterSet::http();
        for kind in Source::ALL {
            assert_eq!(set.get(kind).map(|a| a.kind()), Some(kind));
        }
    }

    #[test]
    fn test_insert_replaces_by_kind() {
        let set = AdapterSet::new()
            .with(GreenhouseAdapter::new())
            .with(MockAdapter::new(Source::Greenhouse));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(Source::Greenhouse).unwrap().name(), "greenhouse");
        assert!(set.get(Source::Lever).is_none());
    }
}
