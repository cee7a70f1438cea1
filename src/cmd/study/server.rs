// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use chrono::NaiveDateTime;
use flipcards_core::error::Fallible;
use flipcards_core::error::fail;
use flipcards_core::session::ReviewSession;
use flipcards_core::store::CardStore;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::spawn;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;
use tokio::time::sleep;

use crate::assistant::Assistant;
use crate::assistant::CONNECT_DELAY;
use crate::cmd::study::get::assistant_handler;
use crate::cmd::study::get::create_handler;
use crate::cmd::study::get::review_handler;
use crate::cmd::study::get::root_handler;
use crate::cmd::study::get::search_handler;
use crate::cmd::study::get::stats_handler;
use crate::cmd::study::post::post_handler;
use crate::cmd::study::state::MutableState;
use crate::cmd::study::state::ServerState;
use crate::cmd::study::state::Tab;
use crate::storage::CardFile;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

pub struct ServerConfig {
    pub cards: String,
    pub host: String,
    pub port: u16,
    pub session_started_at: NaiveDateTime,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let path = Path::new(&config.cards);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return fail("collection directory does not exist.");
        }
    }

    let file = CardFile::new(path);
    let store = CardStore::new(file.load());

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        session_started_at: config.session_started_at,
        mutable: Arc::new(Mutex::new(MutableState {
            file,
            store,
            session: ReviewSession::new(),
            active_tab: Tab::Create,
            flipped: false,
            notice: None,
            notice_generation: 0,
            search_query: String::new(),
            assistant: Assistant::new(),
            report: None,
            graded_this_session: 0,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };

    // The fake assistant handshake: connect after a fixed delay.
    let assistant_state = state.clone();
    spawn(async move {
        sleep(CONNECT_DELAY).await;
        let mut mutable = assistant_state.mutable.lock().unwrap();
        mutable.assistant.mark_connected();
        log::debug!("assistant handshake finished");
    });

    let app = Router::new();
    let app = app.route("/", get(root_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/create", get(create_handler));
    let app = app.route("/search", get(search_handler));
    let app = app.route("/review", get(review_handler));
    let app = app.route("/stats", get(stats_handler));
    let app = app.route("/assistant", get(assistant_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or shutdown button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;
    Ok(())
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
