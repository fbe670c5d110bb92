//! Dedup ledger: identity key to first-seen timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::job::{JobRecord, Source};

const DELIMITER: char = ':';

/// Build the identity key for a posting.
///
/// Format is `source:company:id:url`. `%` and `:` inside the first three
/// fields are percent-escaped, so the key stays injective even when a company
/// name or id contains the delimiter. The URL is last and left as-is.
pub fn identity_key(source: Source, company: &str, id: &str, url: &str) -> String {
    let mut key = String::with_capacity(company.len() + id.len() + url.len() + 16);
    key.push_str(source.slug());
    key.push(DELIMITER);
    push_escaped(&mut key, company);
    key.push(DELIMITER);
    push_escaped(&mut key, id);
    key.push(DELIMITER);
    key.push_str(url);
    key
}

/// Identity key of a record under a given display company.
pub fn job_key(job: &JobRecord, company: &str) -> String {
    identity_key(job.source, company, &job.id, &job.url)
}

fn push_escaped(out: &mut String, field: &str) {
    for c in field.chars() {
        match c {
            '%' => out.push_str("%25"),
            DELIMITER => out.push_str("%3A"),
            c => out.push(c),
        }
    }
}

/// Keys already reported, with the time each was first detected.
///
/// Grows monotonically; nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupLedger {
    #[serde(default)]
    seen: BTreeMap<String, String>,
}

impl DedupLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key has been reported before.
    pub fn has_seen(&self, key: &str) -> bool {
        self.seen.contains_key(key)
    }

    /// Record a key as seen at `at`. Overwrites an existing timestamp.
    pub fn mark_seen(&mut self, key: impl Into<String>, at: DateTime<Utc>) {
        self.seen.insert(
            key.into(),
            at.to_rfc3339_opts(SecondsFormat::Micros, false),
        );
    }

    /// First-seen timestamp as stored.
    pub fn seen_at(&self, key: &str) -> Option<&str> {
        self.seen.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.seen.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
