//! Shared types for the notes drawer service and its RPC clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Remote records
// =====================================================

/// A note as persisted by the torn.com notes endpoints.
///
/// `_id` is server-assigned and immutable. `title` may embed `/` characters
/// that encode a virtual folder path (e.g. `"Work/Todo"` lives under the
/// `Work` folder); there is no escaping for a literal `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl Note {
    /// Title shown in flat lists; empty titles display as "Untitled".
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

// =====================================================
// RPC Response envelope
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// RPC Request Types
// =====================================================

/// Render a Markdown preview
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// Markdown source; absent or empty renders the placeholder fragment
    #[serde(default)]
    pub markdown: Option<String>,
}

/// Create a new remote note
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    /// Defaults to "New Note"
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Switch the editor to another note
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectNoteRequest {
    pub id: String,
    /// Required to switch away from unsaved edits
    #[serde(default)]
    pub discard_changes: bool,
}

/// Update the editor buffers (marks the session dirty)
#[derive(Debug, Serialize, Deserialize)]
pub struct EditBufferRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Delete the selected note; `confirm` must be true before any network call
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteNoteRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// Create a note from an uploaded text file
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportRequest {
    pub filename: String,
    pub content: String,
}

/// Flip one folder's collapsed state
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleFolderRequest {
    pub path: String,
}

/// Partial settings update; absent fields are left unchanged
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub panel_width: Option<u32>,
    #[serde(default)]
    pub sidebar_collapsed: Option<bool>,
}

// =====================================================
// RPC Result Types
// =====================================================

/// Rendered preview HTML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResult {
    pub html: String,
}

/// One entry of the flat note selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    /// Title with the "Untitled" fallback applied
    pub label: String,
}

/// Snapshot of the drawer session: selector list, selection, editor buffers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub notes: Vec<NoteListItem>,
    #[serde(default)]
    pub selected_id: Option<String>,
    pub editor_title: String,
    pub editor_text: String,
    pub dirty: bool,
}

/// A folder of the derived display tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderView {
    pub name: String,
    /// Path segments joined with "/"; the collapse-state key
    pub path: String,
    pub collapsed: bool,
    pub entries: Vec<TreeEntry>,
}

/// A note leaf of the derived display tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteLeafView {
    pub id: String,
    /// Final path segment of the title
    pub label: String,
    /// Full title, for selection
    pub title: String,
}

/// One display-tree node: folder or note leaf
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeEntry {
    Folder(FolderView),
    Note(NoteLeafView),
}

/// The derived folder tree, root level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeView {
    pub entries: Vec<TreeEntry>,
}

/// Export payload for a .md download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    pub filename: String,
    pub content: String,
}

/// Folder toggle outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleFolderResult {
    pub path: String,
    pub collapsed: bool,
}

/// Persisted drawer settings, as seen over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsView {
    pub panel_width: u32,
    pub sidebar_collapsed: bool,
    /// Sorted for stable output
    pub collapsed_folders: Vec<String>,
}

/// Service health status
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub api_base_url: String,
    pub note_count: usize,
    pub total_saves: u64,
}
