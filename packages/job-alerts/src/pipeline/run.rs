//! Alert run orchestration: fetch → window → match → dedup → sort.

use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::future::Future;
use tracing::{debug, info, warn};

use crate::adapters::AdapterSet;
use crate::error::{AlertError, FetchError, FetchResult, Result};
use crate::pipeline::matcher::mismatch_reason;
use crate::pipeline::text::search_blob;
use crate::pipeline::window::in_window;
use crate::render::markdown::render_markdown;
use crate::stores::ledger::{job_key, DedupLedger};
use crate::traits::store::LedgerStore;
use crate::types::config::{AlertsConfig, InterestProfile, TargetConfig};
use crate::types::job::{JobRecord, Source};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Targets attempted
    pub targets: usize,

    /// Records returned by adapters
    pub fetched: usize,

    /// Records without a timestamp or older than the cutoff
    pub outside_window: usize,

    /// Records rejected by the profile
    pub unmatched: usize,

    /// Records already in the ledger
    pub duplicates: usize,

    pub accepted: usize,

    /// Display names of targets whose fetch failed
    pub failed_targets: Vec<String>,
}

impl RunStats {
    /// Whether every target fetched successfully.
    pub fn is_success(&self) -> bool {
        self.failed_targets.is_empty()
    }
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// New matching postings, newest first
    pub accepted: Vec<JobRecord>,

    /// Window as written in configuration
    pub window_label: String,

    pub stats: RunStats,
}

impl RunReport {
    /// Render the digest for this run.
    pub fn digest(&self) -> String {
        render_markdown(&self.accepted, &self.window_label)
    }
}

/// Drives every target through the filter chain against one ledger.
pub struct AlertPipeline {
    adapters: AdapterSet,
    profile: InterestProfile,
    clock: Clock,
}

impl AlertPipeline {
    pub fn new(adapters: AdapterSet, profile: InterestProfile) -> Self {
        Self {
            adapters,
            profile,
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the wall clock (for tests).
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn profile(&self) -> &InterestProfile {
        &self.profile
    }

    /// Process targets in order, marking accepted postings in `ledger`.
    ///
    /// A target whose fetch fails is logged and skipped; it never aborts the run.
    pub async fn run(&self, targets: &[TargetConfig], ledger: &mut DedupLedger) -> RunReport {
        let cutoff = self.profile.window.cutoff((self.clock)());
        let mut stats = RunStats::default();
        let mut accepted = Vec::new();

        info!(
            window = %self.profile.window,
            cutoff = %cutoff,
            targets = targets.len(),
            "Starting alert run"
        );

        for target in targets {
            stats.targets += 1;

            let jobs = match self.fetch(target).await {
                Ok(jobs) => jobs,
                Err(e) => {
                    warn!(
                        provider = %target.kind,
                        target = %target.company,
                        identifier = %target.identifier,
                        error = %e,
                        "{} failed {} ({}): {}",
                        target.kind, target.company, target.identifier, e
                    );
                    stats.failed_targets.push(target.company.clone());
                    continue;
                }
            };

            if target.kind == Source::Custom {
                debug!(target = %target.company, returned = jobs.len(), "custom portal output discarded");
                continue;
            }

            let before = accepted.len();
            stats.fetched += jobs.len();
            for job in jobs {
                if let Some(job) = self.admit(job, target, cutoff, ledger, &mut stats) {
                    accepted.push(job);
                }
            }

            info!(
                provider = %target.kind,
                target = %target.company,
                new = accepted.len() - before,
                "Processed target"
            );
        }

        sort_newest_first(&mut accepted);
        stats.accepted = accepted.len();

        info!(
            "Run complete: {} fetched, {} outside window, {} unmatched, {} duplicates, {} new, {} failed targets",
            stats.fetched,
            stats.outside_window,
            stats.unmatched,
            stats.duplicates,
            stats.accepted,
            stats.failed_targets.len()
        );

        RunReport {
            accepted,
            window_label: self.profile.window.label().to_string(),
            stats,
        }
    }

    async fn fetch(&self, target: &TargetConfig) -> FetchResult<Vec<JobRecord>> {
        let adapter = self
            .adapters
            .get(target.kind)
            .ok_or(FetchError::NoAdapter(target.kind.slug()))?;
        adapter.fetch_jobs(&target.identifier).await
    }

    /// Window, profile, then ledger. Marks the key and tags the company on acceptance.
    fn admit(
        &self,
        mut job: JobRecord,
        target: &TargetConfig,
        cutoff: DateTime<Utc>,
        ledger: &mut DedupLedger,
        stats: &mut RunStats,
    ) -> Option<JobRecord> {
        if !in_window(job.created_at, cutoff) {
            stats.outside_window += 1;
            return None;
        }

        if let Some(reason) = mismatch_reason(&search_blob(&job), &self.profile) {
            debug!(title = %job.title, reason = reason.as_str(), "dropped");
            stats.unmatched += 1;
            return None;
        }

        let key = job_key(&job, &target.company);
        if ledger.has_seen(&key) {
            debug!(key = %key, "already reported");
            stats.duplicates += 1;
            return None;
        }

        ledger.mark_seen(key, (self.clock)());
        job.company = target.company.clone();
        Some(job)
    }
}

/// Sort by creation time descending; missing timestamps sort as oldest.
pub fn sort_newest_first(jobs: &mut [JobRecord]) {
    jobs.sort_by_key(|job| Reverse(job.created_at.unwrap_or(DateTime::<Utc>::MIN_UTC)));
}

/// One complete run: validate, load ledger, run, publish digest, persist ledger.
///
/// Configuration is validated before any fetch. The ledger is saved only
/// after `publish` succeeds, so a failed publish re-reports next run.
pub async fn run_once<S, F, Fut>(
    config: &AlertsConfig,
    adapters: AdapterSet,
    store: &S,
    publish: F,
) -> Result<RunReport>
where
    S: LedgerStore,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    config.validate()?;
    let profile = config.profile()?;

    let mut ledger = store.load().await?;
    let pipeline = AlertPipeline::new(adapters, profile);
    let report = pipeline.run(&config.targets(), &mut ledger).await;

    publish(report.digest()).await.map_err(AlertError::Digest)?;
    store.save(&ledger).await?;

    Ok(report)
}
