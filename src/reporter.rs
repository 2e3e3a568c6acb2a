use crate::diagnostics::summarize;
use crate::models::{Diagnosis, FetchOutcome, FetchResult, IssueSeverity, MetaTags, PreviewReport};
use anyhow::Result;
use colored::*;
use std::path::Path;
use std::time::Duration;

pub struct Reporter;

impl Reporter {
    pub fn generate_report(
        url: &str,
        fetch: FetchResult,
        meta: MetaTags,
        diagnostics: Vec<Diagnosis>,
        elapsed: Duration,
    ) -> PreviewReport {
        let summary = summarize(&diagnostics);
        let timestamp = chrono::Utc::now().to_rfc3339();

        PreviewReport {
            url: url.to_string(),
            final_url: fetch.final_url,
            outcome: fetch.outcome,
            chain: fetch.chain,
            meta,
            cache: fetch.headers,
            diagnostics,
            summary,
            timestamp,
            ms: elapsed.as_millis() as u64,
        }
    }

    pub fn print_text_report(report: &PreviewReport) {
        let status = report
            .chain
            .last()
            .map(|hop| {
                let code = hop.status.to_string();
                if hop.status < 300 {
                    code.bright_green()
                } else if hop.status < 400 {
                    code.yellow()
                } else {
                    code.bright_red()
                }
            })
            .unwrap_or_else(|| "?".dimmed());

        println!("{} {} {}", "final:".bright_white().bold(), status, report.final_url);

        if report.outcome == FetchOutcome::RedirectLimitExceeded {
            println!(
                "{} redirect limit reached after {} request(s)",
                "note:".yellow().bold(),
                report.chain.len()
            );
        }

        for (key, value) in &report.meta {
            println!("{}: {}", key.bright_white(), value);
        }

        for diagnosis in &report.diagnostics {
            let level = match diagnosis.level {
                IssueSeverity::Error => "ERROR".bright_red(),
                IssueSeverity::Warning => "WARN ".yellow(),
                IssueSeverity::Info => "INFO ".bright_cyan(),
            };
            println!("[{}] {}: {}", level, diagnosis.code, diagnosis.message);
        }

        println!(
            "issues: {} warning(s), {} error(s)",
            report.summary.warnings, report.summary.errors
        );
    }

    pub fn print_json_report(report: &PreviewReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        println!("{}", json);
        Ok(())
    }

    pub fn print_baseline_diff(diffs: &[String]) {
        eprintln!("{} ({}):", "baseline diff".bright_red().bold(), diffs.len());
        for diff in diffs {
            eprintln!("- {}", diff);
        }
    }

    pub fn print_baseline_updated(path: &Path) {
        println!(
            "baseline updated: {}",
            path.display().to_string().bright_green()
        );
    }
}
