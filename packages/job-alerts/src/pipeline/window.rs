//! Lookback window filter.

use chrono::{DateTime, Utc};

/// Whether a posting was created at or after `cutoff`.
///
/// Postings without a creation time never pass, whatever the window.
pub fn in_window(created_at: Option<DateTime<Utc>>, cutoff: DateTime<Utc>) -> bool {
    created_at.is_some_and(|created| created >= cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::Window;
    use chrono::Duration;

    #[test]
    fn test_boundary_is_inclusive() {
        let now = Utc::now();
        let cutoff = Window::parse("1h").unwrap().cutoff(now);

        assert!(in_window(Some(cutoff), cutoff));
        assert!(in_window(Some(now - Duration::minutes(30)), cutoff));
        assert!(!in_window(Some(now - Duration::minutes(61)), cutoff));
    }

    #[test]
    fn test_missing_timestamp_never_passes() {
        let now = Utc::now();
        let huge = format!("{}d", u32::MAX);
        for window in ["0h", "1h", "365d", huge.as_str()] {
            let cutoff = Window::parse(window).unwrap().cutoff(now);
            assert!(!in_window(None, cutoff), "window {window}");
        }
        assert!(!in_window(None, DateTime::<Utc>::MIN_UTC));
    }
}
