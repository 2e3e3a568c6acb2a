use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Creates a reqwest client for replaying crawler fetches.
///
/// Redirects are never followed automatically so every hop can be recorded,
/// and `timeout` bounds each individual request (headers and body).
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .context("Failed to build HTTP client")?;

    Ok(client)
}
