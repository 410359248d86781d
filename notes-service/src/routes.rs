//! Axum route handlers for the drawer RPC API.
//!
//! This is the seam where the drawer UI calls in. Handlers validate input,
//! gate destructive operations on explicit confirmation, and forward to the
//! session behind one async mutex — mutating calls are thereby serialized.
//! Remote failures map to 502, local guard failures to 400; nothing here is
//! fatal to the service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use std::sync::Arc;

use torn_notes_types::*;

use crate::config::defaults;
use crate::markdown;
use crate::notes::folder_tree::build_tree;
use crate::notes::transfer;
use crate::notes::DrawerSession;
use crate::settings::SettingsStore;

pub struct AppState {
    pub session: tokio::sync::Mutex<DrawerSession>,
    pub settings: Mutex<SettingsStore>,
    pub api_base_url: String,
    pub start_time: Instant,
    pub save_count: AtomicU64,
}

fn session_view(session: &DrawerSession) -> SessionView {
    let notes = session
        .sorted_notes()
        .into_iter()
        .map(|n| NoteListItem {
            id: n.id.clone(),
            title: n.title.clone(),
            label: n.display_title().to_string(),
        })
        .collect();

    SessionView {
        notes,
        selected_id: session.selected_id().map(str::to_string),
        editor_title: session.editor_title().to_string(),
        editor_text: session.editor_text().to_string(),
        dirty: session.is_dirty(),
    }
}

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let note_count = state.session.lock().await.notes().len();

    let status = ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        api_base_url: state.api_base_url.clone(),
        note_count,
        total_saves: state.save_count.load(Ordering::Relaxed),
    };

    (StatusCode::OK, Json(RpcResponse::ok(status)))
}

// POST /rpc/preview
pub async fn preview(
    Json(req): Json<PreviewRequest>,
) -> (StatusCode, Json<RpcResponse<PreviewResult>>) {
    let html = markdown::render(req.markdown.as_deref().unwrap_or(""));
    (StatusCode::OK, Json(RpcResponse::ok(PreviewResult { html })))
}

// GET /rpc/notes
pub async fn get_notes(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    let session = state.session.lock().await;
    (StatusCode::OK, Json(RpcResponse::ok(session_view(&session))))
}

// POST /rpc/notes/refresh
pub async fn refresh_notes(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    let mut session = state.session.lock().await;
    match session.load_notes().await {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(session_view(&session)))),
        Err(e) => {
            log::error!("Error loading notes: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(e)))
        }
    }
}

// POST /rpc/notes/create
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNoteRequest>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    let title = req
        .title
        .unwrap_or_else(|| defaults::NEW_NOTE_TITLE.to_string());
    let text = req.text.unwrap_or_default();

    let mut session = state.session.lock().await;
    match session.create_note(&title, &text).await {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(session_view(&session)))),
        Err(e) => {
            log::error!("Error creating note: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(e)))
        }
    }
}

// POST /rpc/notes/select
pub async fn select_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectNoteRequest>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    let mut session = state.session.lock().await;
    match session.select_note(&req.id, req.discard_changes) {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(session_view(&session)))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(RpcResponse::err(e))),
    }
}

// POST /rpc/notes/edit
pub async fn edit_buffers(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EditBufferRequest>,
) -> (StatusCode, Json<RpcResponse<PreviewResult>>) {
    let mut session = state.session.lock().await;
    session.edit_buffers(req.title, req.text);

    let html = markdown::render(session.editor_text());
    (StatusCode::OK, Json(RpcResponse::ok(PreviewResult { html })))
}

// POST /rpc/notes/save
pub async fn save_note(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    let mut session = state.session.lock().await;
    if !session.has_selection() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("No note selected")),
        );
    }

    match session.save_current().await {
        Ok(()) => {
            state.save_count.fetch_add(1, Ordering::Relaxed);
            (StatusCode::OK, Json(RpcResponse::ok(session_view(&session))))
        }
        Err(e) => {
            log::error!("Error saving note: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(e)))
        }
    }
}

// POST /rpc/notes/delete
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteNoteRequest>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    // The confirmation gate sits in front of any network call
    if !req.confirm {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("Delete requires confirmation")),
        );
    }

    let mut session = state.session.lock().await;
    if !session.has_selection() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("No note selected")),
        );
    }

    match session.delete_current().await {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(session_view(&session)))),
        Err(e) => {
            log::error!("Error deleting note: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(e)))
        }
    }
}

// GET /rpc/tree
pub async fn tree(State(state): State<Arc<AppState>>) -> (StatusCode, Json<RpcResponse<TreeView>>) {
    let session = state.session.lock().await;
    let collapsed = {
        let settings = state.settings.lock().unwrap();
        settings.get().collapsed_folders.clone()
    };

    let entries = build_tree(session.notes(), &collapsed);
    (StatusCode::OK, Json(RpcResponse::ok(TreeView { entries })))
}

// POST /rpc/tree/toggle
pub async fn toggle_folder(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ToggleFolderRequest>,
) -> (StatusCode, Json<RpcResponse<ToggleFolderResult>>) {
    let mut settings = state.settings.lock().unwrap();
    match settings.toggle_folder(&req.path) {
        Ok(collapsed) => (
            StatusCode::OK,
            Json(RpcResponse::ok(ToggleFolderResult {
                path: req.path,
                collapsed,
            })),
        ),
        Err(e) => {
            log::error!("Error persisting folder state: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(RpcResponse::err(e)))
        }
    }
}

// POST /rpc/export
pub async fn export_note(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ExportResult>>) {
    let session = state.session.lock().await;
    if session.editor_title().is_empty() && session.editor_text().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("No content to export")),
        );
    }

    let result = ExportResult {
        filename: transfer::export_filename(session.editor_title()),
        content: transfer::decode_entities(session.editor_text()),
    };
    (StatusCode::OK, Json(RpcResponse::ok(result)))
}

// POST /rpc/import
pub async fn import_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportRequest>,
) -> (StatusCode, Json<RpcResponse<SessionView>>) {
    let title = transfer::import_title(&req.filename);

    let mut session = state.session.lock().await;
    match session.create_note(&title, &req.content).await {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(session_view(&session)))),
        Err(e) => {
            log::error!("Error importing note: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(e)))
        }
    }
}

fn settings_view(settings: &SettingsStore) -> SettingsView {
    let mut collapsed_folders: Vec<String> =
        settings.get().collapsed_folders.iter().cloned().collect();
    collapsed_folders.sort();

    SettingsView {
        panel_width: settings.get().panel_width,
        sidebar_collapsed: settings.get().sidebar_collapsed,
        collapsed_folders,
    }
}

// GET /rpc/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<SettingsView>>) {
    let settings = state.settings.lock().unwrap();
    (StatusCode::OK, Json(RpcResponse::ok(settings_view(&settings))))
}

// PUT /rpc/settings
pub async fn put_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SettingsUpdate>,
) -> (StatusCode, Json<RpcResponse<SettingsView>>) {
    let mut settings = state.settings.lock().unwrap();
    let result = settings.update(|s| {
        if let Some(width) = req.panel_width {
            s.panel_width = width;
        }
        if let Some(collapsed) = req.sidebar_collapsed {
            s.sidebar_collapsed = collapsed;
        }
    });

    match result {
        Ok(()) => (StatusCode::OK, Json(RpcResponse::ok(settings_view(&settings)))),
        Err(e) => {
            log::error!("Error persisting settings: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(RpcResponse::err(e)))
        }
    }
}
