// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use log::info;
use pagelint::app::{create_router, AppState, VERSION};
use pagelint::services::fetch::fetch_client;
use pagelint::services::probe::probe_client;
use pagelint::services::spelling::Speller;
use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Listening port. Fixed per deployment, not runtime-configurable.
const PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    env_logger::init();

    // Dictionary location is the only filesystem configuration
    let dictionary_dir =
        env::var("DICTIONARY_DIR").unwrap_or_else(|_| "dictionaries".to_string());

    // A broken dictionary is fatal at startup; requests never observe it
    let speller = Speller::from_dir(Path::new(&dictionary_dir))
        .unwrap_or_else(|e| panic!("failed to load dictionary from {dictionary_dir}: {e:#}"));
    info!("loaded spell dictionary from {dictionary_dir}");

    let state = AppState {
        speller: Arc::new(speller),
        fetch_client: fetch_client().expect("failed to build fetch client"),
        probe_client: probe_client().expect("failed to build probe client"),
    };

    let app = create_router(state);

    // Bind to 0.0.0.0 to accept connections from any network interface (required for Docker)
    let addr = SocketAddr::from(([0, 0, 0, 0], PORT));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");

    info!("pagelint v{} listening on {}", VERSION, addr);

    axum::serve(listener, app).await.expect("server error");
}
