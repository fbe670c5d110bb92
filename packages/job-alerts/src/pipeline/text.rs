//! Search blob extraction.

use crate::types::job::JobRecord;

/// Raw payload keys that may hold a posting's description, in priority order.
pub const DESCRIPTION_KEYS: [&str; 5] = [
    "description",
    "content",
    "descriptionPlain",
    "descriptionHtml",
    "text",
];

/// Lowercase text the matcher searches.
///
/// Title, location and team, followed by the first non-empty string among
/// [`DESCRIPTION_KEYS`] in the raw payload. Non-string values are skipped.
pub fn search_blob(job: &JobRecord) -> String {
    let description = DESCRIPTION_KEYS
        .iter()
        .filter_map(|key| job.raw.str_field(key))
        .find(|s| !s.is_empty());

    let mut parts = vec![job.title.as_str(), job.location.as_str(), job.team.as_str()];
    parts.extend(description);
    parts.join(" ").to_lowercase()
}
