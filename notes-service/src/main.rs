//! Torn Notes Drawer Service — local RPC backend for the in-page notes drawer.
//!
//! Holds the drawer's note session (snapshot, selection, editor buffers)
//! against the torn.com private notes endpoints and renders Markdown
//! previews. The drawer UI talks to this service over a small local RPC API.
//!
//! Default: http://127.0.0.1:9120/

mod config;
mod markdown;
mod notes;
mod routes;
mod settings;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

use axum::routing::{get, post};

use config::Config;
use notes::{DrawerSession, NotesApiClient, NotesBackend};
use routes::AppState;
use settings::SettingsStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    if config.session_cookie.is_none() {
        log::warn!("No session cookie configured; the notes endpoints will reject requests");
    }

    let backend: Arc<dyn NotesBackend> = Arc::new(NotesApiClient::new(
        &config.api_base_url,
        config.session_cookie.clone(),
    ));

    let mut session = DrawerSession::new(backend);
    match session.load_notes().await {
        Ok(()) => log::info!(
            "Loaded {} notes from {}",
            session.notes().len(),
            config.api_base_url
        ),
        Err(e) => log::warn!("Initial notes load failed: {}", e),
    }

    let settings = SettingsStore::load(config.settings_path.clone());

    let state = Arc::new(AppState {
        session: tokio::sync::Mutex::new(session),
        settings: Mutex::new(settings),
        api_base_url: config.api_base_url.clone(),
        start_time: Instant::now(),
        save_count: AtomicU64::new(0),
    });

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = axum::Router::new()
        .route("/rpc/status", get(routes::status))
        .route("/rpc/preview", post(routes::preview))
        .route("/rpc/notes", get(routes::get_notes))
        .route("/rpc/notes/refresh", post(routes::refresh_notes))
        .route("/rpc/notes/create", post(routes::create_note))
        .route("/rpc/notes/select", post(routes::select_note))
        .route("/rpc/notes/edit", post(routes::edit_buffers))
        .route("/rpc/notes/save", post(routes::save_note))
        .route("/rpc/notes/delete", post(routes::delete_note))
        .route("/rpc/tree", get(routes::tree))
        .route("/rpc/tree/toggle", post(routes::toggle_folder))
        .route("/rpc/export", post(routes::export_note))
        .route("/rpc/import", post(routes::import_note))
        .route("/rpc/settings", get(routes::get_settings).put(routes::put_settings))
        .with_state(state)
        .layer(cors);

    let addr = format!("127.0.0.1:{}", config.port);
    log::info!("Notes drawer service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
