//! Configuration types: targets, interest profile, and lookback window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};
use crate::types::job::Source;

/// Lookback duration parsed from strings like `"1h"` or `"7d"`.
///
/// Keeps the original label for the digest heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    label: String,
    duration: Duration,
}

impl Window {
    /// Parse a window string. Only integer hours (`h`) or days (`d`) are accepted.
    pub fn parse(value: &str) -> ConfigResult<Self> {
        let invalid = || ConfigError::InvalidWindow {
            value: value.to_string(),
        };

        let normalized = value.trim().to_lowercase();
        let (count, unit) = match normalized.char_indices().last() {
            Some((idx, unit)) => (&normalized[..idx], unit),
            None => return Err(invalid()),
        };
        let count: u32 = count.trim().parse().map_err(|_| invalid())?;

        let duration = match unit {
            'h' => Duration::hours(i64::from(count)),
            'd' => Duration::days(i64::from(count)),
            _ => return Err(invalid()),
        };

        Ok(Self {
            label: value.to_string(),
            duration,
        })
    }

    /// The window as written in configuration.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Earliest creation time still inside the window.
    ///
    /// Saturates at the earliest representable instant for very large windows.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl FromStr for Window {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// What a posting must look like to be reported.
///
/// Every term list is optional: an empty list imposes no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestProfile {
    pub window: Window,

    /// At least one must appear
    pub role_any_of: Vec<String>,

    /// At least one must appear
    pub include_any_of: Vec<String>,

    /// None may appear
    pub exclude_any_of: Vec<String>,

    /// Whether the geography check applies
    pub us_only: bool,

    /// At least one must appear when `us_only` is set
    pub us_signals_any_of: Vec<String>,
}

impl InterestProfile {
    /// Create a profile with no term constraints.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            role_any_of: Vec::new(),
            include_any_of: Vec::new(),
            exclude_any_of: Vec::new(),
            us_only: false,
            us_signals_any_of: Vec::new(),
        }
    }

    /// Set the role terms.
    pub fn with_roles(mut self, terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.role_any_of = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the include terms.
    pub fn with_includes(mut self, terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_any_of = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exclude terms.
    pub fn with_excludes(mut self, terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_any_of = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Require at least one of the given geography signals.
    pub fn us_only(mut self, signals: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.us_only = true;
        self.us_signals_any_of = signals.into_iter().map(Into::into).collect();
        self
    }
}

/// One polled entity, normalized across provider lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub kind: Source,

    /// Board slug, company slug, or portal URL depending on `kind`
    pub identifier: String,

    /// Display name used in digests and identity keys
    pub company: String,
}

impl TargetConfig {
    pub fn new(kind: Source, identifier: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            company: company.into(),
        }
    }
}

/// Greenhouse or Ashby entry: `{name, board}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTarget {
    pub name: String,
    pub board: String,
}

/// Lever entry: `{name, company}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTarget {
    pub name: String,
    pub company: String,
}

/// Custom portal entry: `{name, url}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalTarget {
    pub name: String,
    pub url: String,
}

/// The alerts configuration document (`targets.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub window: String,
    pub role_any_of: Vec<String>,
    pub include_any_of: Vec<String>,
    pub exclude_any_of: Vec<String>,
    pub us_only: bool,
    pub us_signals_any_of: Vec<String>,
    pub greenhouse: Vec<BoardTarget>,
    pub lever: Vec<CompanyTarget>,
    pub ashby: Vec<BoardTarget>,
    pub custom_portals: Vec<PortalTarget>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            window: "1h".to_string(),
            role_any_of: Vec::new(),
            include_any_of: Vec::new(),
            exclude_any_of: Vec::new(),
            us_only: true,
            us_signals_any_of: Vec::new(),
            greenhouse: Vec::new(),
            lever: Vec::new(),
            ashby: Vec::new(),
            custom_portals: Vec::new(),
        }
    }
}

impl AlertsConfig {
    /// Parse a configuration document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check everything that would otherwise fail mid-run.
    pub fn validate(&self) -> ConfigResult<()> {
        Window::parse(&self.window)?;
        for target in self.targets() {
            if target.company.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    name: target.company,
                    provider: target.kind.slug(),
                    field: "name",
                });
            }
            if target.identifier.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    name: target.company,
                    provider: target.kind.slug(),
                    field: identifier_field(target.kind),
                });
            }
        }
        Ok(())
    }

    /// Build the interest profile, parsing the window.
    pub fn profile(&self) -> ConfigResult<InterestProfile> {
        Ok(InterestProfile {
            window: Window::parse(&self.window)?,
            role_any_of: self.role_any_of.clone(),
            include_any_of: self.include_any_of.clone(),
            exclude_any_of: self.exclude_any_of.clone(),
            us_only: self.us_only,
            us_signals_any_of: self.us_signals_any_of.clone(),
        })
    }

    /// All targets in processing order: grouped by provider, config order within each.
    pub fn targets(&self) -> Vec<TargetConfig> {
        let greenhouse = self
            .greenhouse
            .iter()
            .map(|t| TargetConfig::new(Source::Greenhouse, &t.board, &t.name));
        let lever = self
            .lever
            .iter()
            .map(|t| TargetConfig::new(Source::Lever, &t.company, &t.name));
        let ashby = self
            .ashby
            .iter()
            .map(|t| TargetConfig::new(Source::Ashby, &t.board, &t.name));
        let custom = self
            .custom_portals
            .iter()
            .map(|t| TargetConfig::new(Source::Custom, &t.url, &t.name));

        greenhouse.chain(lever).chain(ashby).chain(custom).collect()
    }
}

fn identifier_field(kind: Source) -> &'static str {
    match kind {
        Source::Greenhouse | Source::Ashby => "board",
        Source::Lever => "company",
        Source::Custom => "url",
    }
}
