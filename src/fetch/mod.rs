//! HTTP retrieval of snapshot documents.

pub mod auth;
mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use reqwest::header::{ACCEPT, HeaderValue};

/// Fetches a snapshot document from `url`.
///
/// Fails on any non-success HTTP status; a truncated or errored download
/// is fatal for the run, never retried.
pub async fn fetch_snapshot<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let mut req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("snapshot request to {url} failed with status {status}");
    }

    Ok(resp.bytes().await?.to_vec())
}
