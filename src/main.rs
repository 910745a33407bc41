//! CLI entry point for the site scan comparison report.
//!
//! Loads one Site Scanning snapshot (from the API or a cached file),
//! partitions it into the www / other-NCI / other-federal cohorts, and
//! prints the comparison table plus the DAP and third-party groupings.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use site_scan_report::analyzers::report::build_report;
use site_scan_report::fetch::auth::ApiKey;
use site_scan_report::fetch::{BasicClient, fetch_snapshot};
use site_scan_report::output::emit;
use site_scan_report::parser::parse_snapshot;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Default snapshot endpoint; `SCAN_API_URL` overrides it.
const DEFAULT_SNAPSHOT_URL: &str = "https://api.gsa.gov/technology/site-scanning/v1/websites/";

#[derive(Parser)]
#[command(name = "site_scan_report")]
#[command(about = "Cohort comparison report over a Site Scanning snapshot", long_about = None)]
struct Cli {
    /// Snapshot source: a file path or URL. Defaults to the Site
    /// Scanning API (override with SCAN_API_URL).
    #[arg(value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/site_scan_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("site_scan_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let source = cli
        .source
        .or_else(|| std::env::var("SCAN_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_SNAPSHOT_URL.to_string());

    let started = Utc::now();
    let bytes = fetcher(&source).await?;
    let records = parse_snapshot(&bytes)?;
    info!(records = records.len(), source = %source, "snapshot loaded");

    let report = build_report(&records)?;
    emit(&report, cli.output.as_deref())?;

    info!(
        rows = report.rows.len(),
        dap_groups = report.dap_groups.len(),
        domains = report.domain_groups.len(),
        elapsed_ms = (Utc::now() - started).num_milliseconds(),
        "report complete"
    );

    Ok(())
}

/// Loads snapshot data from a local file path or fetches it over HTTP.
/// URL fetches go through the api.data.gov key decorator when
/// `SCAN_API_KEY` is set.
#[tracing::instrument(fields(source = %source))]
async fn fetcher(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        let client = BasicClient::new();
        match std::env::var("SCAN_API_KEY") {
            Ok(key) => fetch_snapshot(&ApiKey::data_gov(client, key), source).await,
            Err(_) => fetch_snapshot(&client, source).await,
        }
    } else {
        Ok(std::fs::read(source)?)
    }
}
