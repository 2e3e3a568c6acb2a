//! Redirect-chain replay.
//!
//! Walks redirects by hand with a crawler header profile, recording one [`Hop`]
//! per response, so the chain a social crawler would observe can be reported
//! and diagnosed.

use crate::headers::HeaderProfile;
use crate::http_client::build_http_client;
use crate::models::{FetchOutcome, FetchResult, HeaderMap, Hop};
use anyhow::{Context, Result, anyhow};
use reqwest::header::{CONTENT_TYPE, LOCATION};
use std::time::Duration;
use url::Url;

/// Response headers kept on each hop
pub const RECORDED_HEADERS: &[&str] = &[
    "cache-control",
    "etag",
    "last-modified",
    "expires",
    "age",
    "x-cache",
    "content-type",
    "x-robots-tag",
];

pub struct RedirectFetcher {
    client: reqwest::Client,
    profile: HeaderProfile,
    max_redirects: usize,
}

impl RedirectFetcher {
    pub fn new(profile: HeaderProfile, max_redirects: usize, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(anyhow!("Timeout must be greater than zero"));
        }

        Ok(Self {
            client: build_http_client(timeout)?,
            profile,
            max_redirects,
        })
    }

    /// Follows redirects from `url` until a terminal response or until
    /// `max_redirects + 1` requests have been issued.
    ///
    /// Any transport failure aborts the whole chain.
    pub async fn fetch(&self, url: &str) -> Result<FetchResult> {
        let mut chain: Vec<Hop> = Vec::new();
        let mut current = url.to_string();

        for hop_index in 0..=self.max_redirects {
            tracing::debug!(hop = hop_index, url = %current, bot = %self.profile.bot(), "Issuing request");

            let response = self
                .profile
                .apply_to_request_builder(self.client.get(&current))
                .send()
                .await
                .map_err(|e| describe_transport_error(e, &current))?;

            let status = response.status().as_u16();
            let headers = pick_headers(response.headers());
            let location = if (300..400).contains(&status) {
                location_header(response.headers())
            } else {
                None
            };

            let hop = Hop {
                url: current.clone(),
                status,
                location,
                headers,
            };
            tracing::debug!(url = %hop.url, status, location = ?hop.location, "Received response");

            if let Some(location) = hop.location.as_deref() {
                let next = resolve_location(&current, location)?;
                tracing::debug!(from = %current, to = %next, "Following redirect");
                chain.push(hop);
                current = next;
                continue;
            }

            let is_html = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.contains("text/html"));

            let html = if is_html {
                response
                    .text()
                    .await
                    .map_err(|e| describe_transport_error(e, &current))?
            } else {
                String::new()
            };

            let headers = hop.headers.clone();
            chain.push(hop);

            return Ok(FetchResult {
                chain,
                final_url: current,
                html,
                headers,
                outcome: FetchOutcome::Terminal,
            });
        }

        tracing::warn!(
            url = %url,
            max_redirects = self.max_redirects,
            "Redirect budget exhausted before a terminal response"
        );

        Ok(FetchResult {
            chain,
            final_url: current,
            html: String::new(),
            headers: HeaderMap::new(),
            outcome: FetchOutcome::RedirectLimitExceeded,
        })
    }
}

/// Convenience wrapper building a one-off [`RedirectFetcher`]
pub async fn fetch_chain(
    url: &str,
    profile: &HeaderProfile,
    max_redirects: usize,
    timeout: Duration,
) -> Result<FetchResult> {
    RedirectFetcher::new(profile.clone(), max_redirects, timeout)?
        .fetch(url)
        .await
}

/// Resolves a Location value against the URL of the hop that returned it
pub fn resolve_location(current: &str, location: &str) -> Result<String> {
    let base = Url::parse(current).with_context(|| format!("Invalid hop URL: {}", current))?;
    let next = base
        .join(location)
        .with_context(|| format!("Invalid redirect location '{}' from {}", location, current))?;
    Ok(next.to_string())
}

/// Non-empty Location value; bytes outside UTF-8 are decoded lossily
fn location_header(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(LOCATION)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .filter(|v| !v.is_empty())
}

fn pick_headers(headers: &reqwest::header::HeaderMap) -> HeaderMap {
    let mut picked = HeaderMap::new();

    for name in RECORDED_HEADERS {
        let value = headers
            .get_all(*name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");

        if !value.is_empty() {
            picked.insert((*name).to_string(), value);
        }
    }

    picked
}

fn describe_transport_error(error: reqwest::Error, url: &str) -> anyhow::Error {
    if error.is_timeout() {
        anyhow::Error::new(error).context(format!("Request to {} timed out", url))
    } else {
        anyhow::Error::new(error).context(format!("Request to {} failed", url))
    }
}
