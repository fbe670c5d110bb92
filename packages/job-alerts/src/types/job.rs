//! The normalized job record every source adapter produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Originating job board provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Greenhouse,
    Lever,
    Ashby,
    Custom,
}

impl Source {
    /// All providers, in the order the pipeline processes them.
    pub const ALL: [Source; 4] = [
        Source::Greenhouse,
        Source::Lever,
        Source::Ashby,
        Source::Custom,
    ];

    /// Lowercase label used in identity keys and logs.
    pub fn slug(&self) -> &'static str {
        match self {
            Source::Greenhouse => "greenhouse",
            Source::Lever => "lever",
            Source::Ashby => "ashby",
            Source::Custom => "custom",
        }
    }

    /// Display label used in digests.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Greenhouse => "Greenhouse",
            Source::Lever => "Lever",
            Source::Ashby => "Ashby",
            Source::Custom => "Custom",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provider's original record.
///
/// Opaque to the pipeline. Only the text extractor reads from it, and only
/// string-valued fields by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(serde_json::Value);

impl RawPayload {
    /// Wrap a provider record.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Read a top-level field if it holds a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    /// Borrow the underlying JSON.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for RawPayload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A job posting in the shape shared by all providers.
///
/// Display strings are never absent: unknown values are empty strings.
/// `created_at` is either a UTC instant or `None` when the provider gave no
/// parseable date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Provider-scoped identifier (numeric ids rendered in decimal)
    pub id: String,

    pub title: String,

    pub location: String,

    pub team: String,

    /// Listing URL, empty when the provider omits it
    pub url: String,

    /// Original publication time
    pub created_at: Option<DateTime<Utc>>,

    pub source: Source,

    /// Display name from configuration; set by the pipeline on acceptance
    pub company: String,

    #[serde(default)]
    pub raw: RawPayload,
}

impl JobRecord {
    /// Create a record with only the required fields set.
    pub fn new(source: Source, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: String::new(),
            team: String::new(),
            url: String::new(),
            created_at: None,
            source,
            company: String::new(),
            raw: RawPayload::default(),
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    /// Set the listing URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the publication time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Attach the provider's original record.
    pub fn with_raw(mut self, raw: impl Into<RawPayload>) -> Self {
        self.raw = raw.into();
        self
    }
}
