// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router
//! directly without starting the full binary.

use crate::models::analysis::{
    AnalysisResponse, AnalyzePageRequest, ErrorResponse, PageMetadata, SpellingResponse,
};
use crate::models::version::VersionResponse;
use crate::services::extract::extract_page;
use crate::services::fetch::fetch_page;
use crate::services::probe::{probe_all, resolve_links};
use crate::services::spelling::{find_misspelled, tokenize, Speller};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::error;
use std::sync::Arc;
use url::Url;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `PAGELINT_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("PAGELINT_VERSION");

/// Message returned to the caller on any fetch/processing failure.
/// The underlying cause stays in the log.
const PROCESSING_ERROR: &str = "An error occurred while processing the URL.";

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Spell dictionary, loaded once at startup and read-only thereafter.
    pub speller: Arc<Speller>,
    /// Pooled client for fetching the page under analysis (follows redirects).
    pub fetch_client: reqwest::Client,
    /// Pooled client for link probes (never follows redirects on its own).
    pub probe_client: reqwest::Client,
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Reject the request before any work begins: the URL must be present and
/// parse as an absolute URL.
fn parse_request_url(raw: &str) -> Result<Url, ApiError> {
    if raw.is_empty() {
        return Err(bad_request("URL is required"));
    }

    Url::parse(raw).map_err(|e| bad_request(format!("Invalid URL: {e}")))
}

/// Map a page-level fetch/processing failure to the generic 500 body.
fn processing_error(url: &str, error: anyhow::Error) -> ApiError {
    error!("failed to process {url}: {error:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: PROCESSING_ERROR.to_string(),
        }),
    )
}

pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "pagelint".to_string(),
        version: VERSION.to_string(),
    })
}

/// Full analysis: link validation plus metadata and spelling.
pub async fn check_links_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePageRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let page_url = parse_request_url(&payload.url)?;

    let html = fetch_page(&state.fetch_client, &page_url)
        .await
        .map_err(|e| processing_error(&payload.url, e))?;

    let extract = extract_page(&html);
    let metadata = PageMetadata::from_extract(&extract);

    let links = resolve_links(&extract.raw_links, &page_url);
    let probes = probe_all(&state.probe_client, links);

    // Spelling has no dependency on the probes; run it while they fan out.
    let tokens = tokenize(&extract.visible_text);
    let misspelled = find_misspelled(&tokens, &state.speller);

    let link_statuses = probes.await;

    Ok(Json(AnalysisResponse::assemble(
        link_statuses,
        metadata,
        misspelled.into_iter().collect(),
    )))
}

/// Spelling-only variant of the pipeline.
pub async fn check_spelling_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePageRequest>,
) -> Result<Json<SpellingResponse>, ApiError> {
    let page_url = parse_request_url(&payload.url)?;

    let html = fetch_page(&state.fetch_client, &page_url)
        .await
        .map_err(|e| processing_error(&payload.url, e))?;

    let extract = extract_page(&html);
    let tokens = tokenize(&extract.visible_text);
    let misspelled = find_misspelled(&tokens, &state.speller);

    Ok(Json(SpellingResponse {
        url: payload.url,
        errors: misspelled.into_iter().collect(),
    }))
}

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/check-links", post(check_links_handler))
        .route("/check-spelling", post(check_spelling_handler))
        .with_state(state)
}
