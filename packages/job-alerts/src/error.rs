//! Typed errors for the job alerts library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! fatal configuration problem apart from a target that merely failed to fetch.

use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Configuration is unusable
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A source failed wholesale
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Ledger could not be read or written
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Digest could not be written
    #[error("digest write failed: {0}")]
    Digest(#[source] std::io::Error),
}

/// Configuration errors. Always fatal, raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Window string is not `<n>h` or `<n>d`
    #[error("invalid window {value:?}: window must be like '1h' or '7d'")]
    InvalidWindow { value: String },

    /// Configuration file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is malformed or misses a required key
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A target entry has an empty slug or name
    #[error("target {name:?} ({provider}) has an empty {field}")]
    EmptyField {
        name: String,
        provider: &'static str,
        field: &'static str,
    },
}

/// Errors that make a whole source fetch fail.
///
/// Recoverable at target granularity: the orchestrator logs them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-2xx response
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Top-level payload has an unexpected shape
    #[error("malformed payload from {url}: {reason}")]
    Payload { url: String, reason: String },

    /// Body is not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No adapter registered for a provider
    #[error("no adapter registered for {0}")]
    NoAdapter(&'static str),
}

/// Ledger persistence errors. Always fatal.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Storage I/O failed
    #[error("ledger I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored ledger is not a valid document
    #[error("corrupt ledger {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Ledger could not be serialised
    #[error("ledger serialisation failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type alias for run-level operations.
pub type Result<T> = std::result::Result<T, AlertError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for source fetches.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
