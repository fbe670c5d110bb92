//! Job alerts CLI
//!
//! `job-alerts run` polls every configured board once and writes a digest of
//! new matching postings. `job-alerts detect` inspects careers pages to find
//! which provider hosts their job board.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_alerts::detect::parse_url_list;
use job_alerts::stores::write_atomic;
use job_alerts::{run_once, AdapterSet, AlertsConfig, FileLedgerStore, ProviderDetector};

#[derive(Parser)]
#[command(name = "job-alerts")]
#[command(about = "Poll job boards and report new postings matching your profile")]
struct Cli {
    /// Debug-level logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all targets once and write the digest
    Run {
        /// Alerts configuration (targets and profile)
        #[arg(long, env = "JOB_ALERTS_CONFIG", default_value = "targets.json")]
        config: PathBuf,

        /// Dedup ledger file
        #[arg(long, env = "JOB_ALERTS_STATE", default_value = "state.json")]
        state: PathBuf,

        /// Digest output file
        #[arg(long, env = "JOB_ALERTS_DIGEST", default_value = "alert.md")]
        digest: PathBuf,

        /// Also print the digest to stdout
        #[arg(long)]
        stdout: bool,
    },

    /// Detect the job board provider behind careers pages
    Detect {
        /// File with one careers URL per line
        #[arg(long, default_value = "careers_urls.txt")]
        urls: PathBuf,

        /// Where to write detection results
        #[arg(long, default_value = "detected.json")]
        out: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            state,
            digest,
            stdout,
        } => run(&config, &state, digest, stdout).await,
        Commands::Detect { urls, out } => detect(&urls, &out).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,job_alerts=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(config_path: &Path, state_path: &Path, digest_path: PathBuf, stdout: bool) -> Result<()> {
    tracing::info!(
        config = %config_path.display(),
        state = %state_path.display(),
        digest = %digest_path.display(),
        "Starting job alerts"
    );

    let config = AlertsConfig::from_path(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let store = FileLedgerStore::new(state_path);

    let report = run_once(&config, AdapterSet::http(), &store, |digest| async move {
        if stdout {
            println!("{digest}");
        }
        write_atomic(&digest_path, digest.as_bytes()).await
    })
    .await
    .context("Alert run failed")?;

    if !report.stats.is_success() {
        eprintln!(
            "{} {} target(s) failed: {}",
            "⚠".yellow(),
            report.stats.failed_targets.len(),
            report.stats.failed_targets.join(", ")
        );
    }

    println!(
        "{} New items: {}",
        "Done.".bright_green(),
        report.accepted.len()
    );
    Ok(())
}

async fn detect(urls_path: &Path, out_path: &Path) -> Result<()> {
    let text = tokio::fs::read_to_string(urls_path)
        .await
        .with_context(|| format!("Failed to read {}", urls_path.display()))?;
    let urls = parse_url_list(&text);

    let detections = ProviderDetector::new().detect_all(&urls).await;

    let json = serde_json::to_string_pretty(&detections).context("Failed to encode detections")?;
    write_atomic(out_path, json.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    println!("Wrote {}", out_path.display().to_string().bright_green());
    Ok(())
}
