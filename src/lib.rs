pub mod baseline;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod extractor;
pub mod fetcher;
pub mod headers;
pub mod http_client;
pub mod models;
pub mod reporter;

use anyhow::Result;
use baseline::{Baseline, DEFAULT_BASELINE_PATH, diff_baseline};
use cli::Cli;
use diagnostics::diagnose;
use extractor::extract_meta;
use fetcher::RedirectFetcher;
use headers::HeaderProfile;
use models::MetaTags;
use reporter::Reporter;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use url::Url;

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    /// The supplied baseline exists and differs from the current snapshot
    BaselineDrift,
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Ok => 0,
            RunStatus::BaselineDrift => 2,
        }
    }
}

pub async fn run(args: Cli) -> Result<RunStatus> {
    // Validate URL
    let is_http = Url::parse(&args.url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !is_http {
        anyhow::bail!("URL must start with http:// or https://");
    }

    let profile = HeaderProfile::for_bot(args.bot);
    let fetcher = RedirectFetcher::new(
        profile,
        args.max_redirects,
        Duration::from_millis(args.timeout),
    )?;

    tracing::info!(url = %args.url, bot = %args.bot, "Fetching preview");
    let started = Instant::now();
    let fetch = fetcher.fetch(&args.url).await?;

    let meta = if fetch.html.is_empty() {
        MetaTags::new()
    } else {
        extract_meta(&fetch.html)
    };
    let current = Baseline::new(fetch.final_url.clone(), meta);

    if args.update_baseline {
        let path = args
            .baseline
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASELINE_PATH));
        current.save(&path)?;
        Reporter::print_baseline_updated(&path);
        return Ok(RunStatus::Ok);
    }

    if let Some(path) = &args.baseline
        && let Some(previous) = Baseline::load(path)?
    {
        let diffs = diff_baseline(&current, &previous);
        if !diffs.is_empty() {
            Reporter::print_baseline_diff(&diffs);
            return Ok(RunStatus::BaselineDrift);
        }
    }

    let diagnostics = diagnose(&current.meta, &fetch.chain, &fetch.headers, &fetch.final_url);
    let report = Reporter::generate_report(
        &args.url,
        fetch,
        current.meta,
        diagnostics,
        started.elapsed(),
    );

    if args.json {
        Reporter::print_json_report(&report)?;
    } else {
        Reporter::print_text_report(&report);
    }

    Ok(RunStatus::Ok)
}
