// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Retrieval of the page under analysis.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent advertised on every outbound request.
pub const USER_AGENT: &str = concat!("pagelint/", env!("PAGELINT_VERSION"));

/// Per-request timeout applied to the page fetch and to every probe hop.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for retrieving the page under analysis. Redirects follow the
/// client's default policy here; the probe client in `probe.rs` is the one
/// that must never follow them on its own.
pub fn fetch_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

/// Fetch the page body. A non-2xx page response is a fetch failure for the
/// whole analysis; per-link leniency applies to probes only.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("failed to fetch {url}"))?;

    let response = response
        .error_for_status()
        .with_context(|| format!("page fetch for {url} returned an error status"))?;

    response
        .text()
        .await
        .with_context(|| format!("failed to read body of {url}"))
}
