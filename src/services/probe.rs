// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Link resolution and concurrent probing.
//!
//! Every anchor found on the page becomes at most one probe: an HTTP GET
//! whose redirects are walked hop by hop so the prober can cap them, track
//! the chain, and spot loops. Probes for one request run concurrently and
//! are joined before the response is assembled; a single bad link degrades
//! to its own error entry and never fails the page's analysis.

use crate::models::analysis::{LinkProbeResult, ProbeStatus};
use crate::services::fetch::{REQUEST_TIMEOUT, USER_AGENT};
use futures::stream::{self, StreamExt};
use log::warn;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, Response, StatusCode};
use url::Url;

/// Maximum redirect hops followed for one probe.
const MAX_REDIRECT_HOPS: usize = 5;

/// Cap on in-flight probes per analysis request.
const MAX_CONCURRENT_PROBES: usize = 50;

/// Client used for link probes. Redirects are never followed automatically;
/// `follow_redirects` walks each hop itself.
pub fn probe_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .redirect(redirect::Policy::none())
        .build()
}

/// Whether the resolved URL is literally an https URL. Judged on the URL as
/// written, independent of where its redirects end up.
pub fn is_https(url: &Url) -> bool {
    url.as_str().starts_with("https://")
}

/// Resolve raw hrefs against the page URL. Hrefs that fail RFC 3986
/// resolution are dropped silently, as are non-http(s) schemes (mailto:,
/// javascript:, tel:, ...): neither produces a probe entry. Duplicates
/// survive; each anchor occurrence is probed on its own.
pub fn resolve_links(hrefs: &[String], base: &Url) -> Vec<Url> {
    hrefs
        .iter()
        .filter_map(|href| base.join(href).ok())
        .filter(|resolved| matches!(resolved.scheme(), "http" | "https"))
        .collect()
}

/// Probe every resolved link concurrently, bounded by
/// `MAX_CONCURRENT_PROBES`. Returns exactly one result per input link; a
/// failed probe contributes its error entry instead of cancelling the rest.
pub async fn probe_all(client: &Client, links: Vec<Url>) -> Vec<LinkProbeResult> {
    let probes = links.into_iter().map(|link| {
        let client = client.clone();
        async move { probe_link(&client, link).await }
    });

    stream::iter(probes)
        .buffer_unordered(MAX_CONCURRENT_PROBES)
        .collect()
        .await
}

async fn probe_link(client: &Client, link: Url) -> LinkProbeResult {
    let link_is_https = is_https(&link);

    match follow_redirects(client, link.clone()).await {
        Ok(outcome) => LinkProbeResult {
            link: link.to_string(),
            status: ProbeStatus::Code(outcome.status.as_u16()),
            is_https: link_is_https,
            redirect_loop: outcome.redirect_loop,
        },
        Err(error) => {
            warn!("probe failed for {link}: {error}");
            LinkProbeResult {
                link: link.to_string(),
                status: ProbeStatus::Failed,
                is_https: false,
                redirect_loop: false,
            }
        }
    }
}

struct ProbeOutcome {
    status: StatusCode,
    redirect_loop: bool,
}

/// Walk redirects by hand, following at most `MAX_REDIRECT_HOPS`. A target
/// already present in this probe's chain marks a loop and stops the walk.
/// The terminal status is the last response's status; when the loop flag or
/// the hop cap truncates the walk, that can itself be a 3xx.
async fn follow_redirects(client: &Client, start: Url) -> reqwest::Result<ProbeOutcome> {
    let mut current = start;
    let mut chain: Vec<Url> = Vec::new();

    loop {
        let response = client.get(current.clone()).send().await?;
        let status = response.status();

        if !status.is_redirection() {
            return Ok(ProbeOutcome {
                status,
                redirect_loop: false,
            });
        }

        let Some(target) = redirect_target(&response, &current) else {
            // A 3xx without a usable Location is terminal.
            return Ok(ProbeOutcome {
                status,
                redirect_loop: false,
            });
        };

        if chain.contains(&target) {
            return Ok(ProbeOutcome {
                status,
                redirect_loop: true,
            });
        }

        if chain.len() >= MAX_REDIRECT_HOPS {
            return Ok(ProbeOutcome {
                status,
                redirect_loop: false,
            });
        }

        chain.push(target.clone());
        current = target;
    }
}

/// Location header resolved against the URL of the response that carried it.
fn redirect_target(response: &Response, current: &Url) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}
