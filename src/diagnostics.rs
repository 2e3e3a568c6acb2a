//! Link-preview rule engine.
//!
//! Every rule is an independent predicate over the same immutable inputs.
//! Rules run in a fixed order and each contributes at most one [`Diagnosis`].

use crate::models::{Diagnosis, HeaderMap, Hop, IssueCode, IssueSeverity, IssueSummary, MetaTags};
use url::Url;

/// Inputs shared by every rule
pub struct Subject<'a> {
    pub meta: &'a MetaTags,
    pub chain: &'a [Hop],
    pub headers: &'a HeaderMap,
    pub final_url: &'a str,
}

impl Subject<'_> {
    fn meta_value(&self, key: &str) -> Option<&str> {
        self.meta
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn header(&self, name: &str) -> &str {
        self.headers.get(name).map(String::as_str).unwrap_or("")
    }
}

struct Rule {
    code: IssueCode,
    severity: IssueSeverity,
    applies: fn(&Subject) -> bool,
    message: fn(&Subject) -> String,
}

static RULES: [Rule; 9] = [
    Rule {
        code: IssueCode::BadStatus,
        severity: IssueSeverity::Error,
        applies: |s| s.chain.last().is_none_or(|hop| hop.status >= 400),
        message: |s| {
            let status = s
                .chain
                .last()
                .map(|hop| hop.status.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!("Final status {} is not OK.", status)
        },
    },
    Rule {
        code: IssueCode::NotHtml,
        severity: IssueSeverity::Error,
        applies: |s| {
            let content_type = s.header("content-type");
            !content_type.is_empty() && !content_type.contains("text/html")
        },
        message: |s| format!("Content-Type is '{}', not HTML.", s.header("content-type")),
    },
    Rule {
        code: IssueCode::MissingOgTitle,
        severity: IssueSeverity::Warning,
        applies: |s| s.meta_value("og:title").is_none() && s.meta_value("title").is_none(),
        message: |_| "Missing og:title (and no <title> fallback).".to_string(),
    },
    Rule {
        code: IssueCode::MissingOgImage,
        severity: IssueSeverity::Warning,
        applies: |s| s.meta_value("og:image").is_none(),
        message: |_| "Missing og:image.".to_string(),
    },
    Rule {
        code: IssueCode::RelativeOgImage,
        severity: IssueSeverity::Warning,
        applies: |s| s.meta_value("og:image").is_some_and(|v| !is_absolute_url(v)),
        message: |_| "og:image is not an absolute URL.".to_string(),
    },
    Rule {
        code: IssueCode::MissingTwitterCard,
        severity: IssueSeverity::Info,
        applies: |s| s.meta_value("twitter:card").is_none(),
        message: |_| "Missing twitter:card.".to_string(),
    },
    Rule {
        code: IssueCode::RobotsBlock,
        severity: IssueSeverity::Warning,
        applies: |s| {
            let robots = s.header("x-robots-tag").to_lowercase();
            robots.contains("noindex") || robots.contains("nofollow")
        },
        message: |_| "x-robots-tag may block previews.".to_string(),
    },
    Rule {
        code: IssueCode::CacheDisabled,
        severity: IssueSeverity::Info,
        applies: |s| {
            let cache_control = s.header("cache-control").to_lowercase();
            cache_control.contains("no-store") || cache_control.contains("no-cache")
        },
        message: |_| "Cache-Control suggests previews may be uncached.".to_string(),
    },
    Rule {
        code: IssueCode::NotHttps,
        severity: IssueSeverity::Info,
        applies: |s| !s.final_url.starts_with("https://"),
        message: |_| "Final URL is not HTTPS.".to_string(),
    },
];

/// Evaluates every rule against the extracted metadata and terminal response
pub fn diagnose(
    meta: &MetaTags,
    chain: &[Hop],
    final_headers: &HeaderMap,
    final_url: &str,
) -> Vec<Diagnosis> {
    let subject = Subject {
        meta,
        chain,
        headers: final_headers,
        final_url,
    };

    RULES
        .iter()
        .filter(|rule| (rule.applies)(&subject))
        .map(|rule| Diagnosis {
            level: rule.severity,
            code: rule.code,
            message: (rule.message)(&subject),
        })
        .collect()
}

pub fn summarize(diagnostics: &[Diagnosis]) -> IssueSummary {
    let mut summary = IssueSummary::default();

    for diagnosis in diagnostics {
        match diagnosis.level {
            IssueSeverity::Error => summary.errors += 1,
            IssueSeverity::Warning => summary.warnings += 1,
            IssueSeverity::Info => summary.infos += 1,
        }
    }

    summary
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}
