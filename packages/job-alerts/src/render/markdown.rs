//! Markdown digest rendering.

use chrono::{DateTime, Utc};

use crate::types::job::JobRecord;

const NO_JOBS: &str = "No new matching jobs found.";

/// Render accepted postings as a markdown digest.
///
/// Items are written in the order given; the pipeline already sorts them
/// newest first.
pub fn render_markdown(items: &[JobRecord], window_label: &str) -> String {
    let mut lines: Vec<String> = vec![
        format!("## New jobs posted in last **{window_label}** (real created/published time)"),
        String::new(),
    ];

    if items.is_empty() {
        lines.push(NO_JOBS.to_string());
        return lines.join("\n");
    }

    for job in items {
        lines.push(format!(
            "- **{}** — {} ({})  ",
            job.title.trim(),
            job.company,
            job.source
        ));
        if !job.location.is_empty() {
            lines.push(format!("  Location: {}  ", job.location));
        }
        lines.push(format!("  Posted: {}  ", format_posted(job.created_at)));
        if !job.url.is_empty() {
            lines.push(format!("  {}", job.url));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// `YYYY-MM-DD HH:MM UTC`, or `unknown`.
pub fn format_posted(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::Source;
    use chrono::TimeZone;

    #[test]
    fn test_empty_digest() {
        let digest = render_markdown(&[], "1h");
        assert_eq!(
            digest,
            "## New jobs posted in last **1h** (real created/published time)\n\nNo new matching jobs found."
        );
    }

    #[test]
    fn test_entry_layout() {
        let mut job = JobRecord::new(Source::Greenhouse, "1", " Senior Engineer ")
            .with_location("Remote - US")
            .with_url("https://x/1")
            .with_created_at(Utc.with_ymd_and_hms(2024, 1, 10, 9, 5, 59).unwrap());
        job.company = "Acme".to_string();

        let digest = render_markdown(&[job], "7d");
        let lines: Vec<&str> = digest.lines().collect();

        assert_eq!(lines[2], "- **Senior Engineer** — Acme (Greenhouse)  ");
        assert_eq!(lines[3], "  Location: Remote - US  ");
        assert_eq!(lines[4], "  Posted: 2024-01-10 09:05 UTC  ");
        assert_eq!(lines[5], "  https://x/1");
        assert!(digest.ends_with('\n'));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut job = JobRecord::new(Source::Lever, "1", "Engineer");
        job.company = "Acme".to_string();

        let digest = render_markdown(&[job], "1h");

        assert!(!digest.contains("Location:"));
        assert!(digest.contains("  Posted: unknown  "));
        assert!(!digest.contains("https://"));
    }
}
