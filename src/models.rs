use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Normalized preview metadata: `og:*` / `twitter:*` keys plus the synthetic
/// `title` and `canonical` keys.
pub type MetaTags = BTreeMap<String, String>;

/// Allow-listed response headers, keyed by lower-cased header name.
pub type HeaderMap = BTreeMap<String, String>;

/// One request/response pair in a redirect chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub url: String,
    pub status: u16,
    /// Redirect target, only recorded for 3xx responses carrying a Location header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub headers: HeaderMap,
}

/// How the redirect walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchOutcome {
    /// A non-redirect response (or a redirect without Location) was reached
    Terminal,
    /// Every response within the budget was a followable redirect
    RedirectLimitExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub chain: Vec<Hop>,
    pub final_url: String,
    /// Terminal body, empty unless the terminal content type is HTML
    pub html: String,
    /// Allow-listed headers of the terminal hop, empty when the budget ran out
    pub headers: HeaderMap,
    pub outcome: FetchOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueSeverity {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warning,
    #[serde(rename = "info")]
    Info,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warn",
            IssueSeverity::Info => "info",
        }
    }
}

/// Stable machine-readable diagnosis codes, one per rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    BadStatus,
    NotHtml,
    MissingOgTitle,
    MissingOgImage,
    RelativeOgImage,
    MissingTwitterCard,
    RobotsBlock,
    CacheDisabled,
    NotHttps,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::BadStatus => "bad-status",
            IssueCode::NotHtml => "not-html",
            IssueCode::MissingOgTitle => "missing-og-title",
            IssueCode::MissingOgImage => "missing-og-image",
            IssueCode::RelativeOgImage => "relative-og-image",
            IssueCode::MissingTwitterCard => "missing-twitter-card",
            IssueCode::RobotsBlock => "robots-block",
            IssueCode::CacheDisabled => "cache-disabled",
            IssueCode::NotHttps => "not-https",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub level: IssueSeverity,
    pub code: IssueCode,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub url: String,
    pub final_url: String,
    pub outcome: FetchOutcome,
    pub chain: Vec<Hop>,
    pub meta: MetaTags,
    pub cache: HeaderMap,
    pub diagnostics: Vec<Diagnosis>,
    pub summary: IssueSummary,
    pub timestamp: String,
    pub ms: u64,
}
