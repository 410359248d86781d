//! DrawerSession — the drawer's note state machine.
//!
//! Owns the in-memory snapshot of remote notes, the current selection, the
//! editable title/text buffers, and the dirty flag. The snapshot is a cache:
//! refetched wholesale after create/delete, patched in place after a
//! successful save. All mutations go through the narrow API here; the RPC
//! layer serializes callers behind one mutex.

use std::sync::Arc;

use torn_notes_types::Note;

use super::api_client::NotesBackend;

pub struct DrawerSession {
    backend: Arc<dyn NotesBackend>,
    notes: Vec<Note>,
    current_id: Option<String>,
    editor_title: String,
    editor_text: String,
    dirty: bool,
}

impl DrawerSession {
    pub fn new(backend: Arc<dyn NotesBackend>) -> Self {
        Self {
            backend,
            notes: Vec::new(),
            current_id: None,
            editor_title: String::new(),
            editor_text: String::new(),
            dirty: false,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Snapshot in display order: alphabetical, case-insensitive, full title.
    pub fn sorted_notes(&self) -> Vec<&Note> {
        let mut sorted: Vec<&Note> = self.notes.iter().collect();
        sorted.sort_by_key(|n| n.title.to_lowercase());
        sorted
    }

    pub fn current(&self) -> Option<&Note> {
        let id = self.current_id.as_deref()?;
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn has_selection(&self) -> bool {
        self.current_id.is_some()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn editor_title(&self) -> &str {
        &self.editor_title
    }

    pub fn editor_text(&self) -> &str {
        &self.editor_text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Fetch the authoritative note set. On success the snapshot is replaced
    /// wholesale and, when nothing is selected yet, the first note in server
    /// order becomes the selection. On failure nothing changes.
    pub async fn load_notes(&mut self) -> Result<(), String> {
        let fetched = self.backend.list_notes().await?;
        self.notes = fetched;

        if self.current_id.is_none() {
            if let Some(id) = self.notes.first().map(|n| n.id.clone()) {
                self.select_local(&id);
            }
        }

        Ok(())
    }

    /// Create a remote note, then re-sync the full list rather than trusting
    /// the echoed record, and select the new note in the refreshed snapshot.
    pub async fn create_note(&mut self, title: &str, text: &str) -> Result<(), String> {
        let created = self.backend.create_note(title, text).await?;

        match self.backend.list_notes().await {
            Ok(fetched) => self.notes = fetched,
            Err(e) => return Err(format!("Note created but refresh failed: {}", e)),
        }

        // The list endpoint may lag behind the create; fall back to the
        // echoed record so the selection is never left dangling
        if !self.notes.iter().any(|n| n.id == created.id) {
            log::warn!("Created note {} missing from refreshed list", created.id);
            self.notes.insert(0, created.clone());
        }

        let id = created.id.clone();
        self.select_local(&id);
        log::info!("Created note {}", id);
        Ok(())
    }

    /// Save the editor buffers to the selected note. On success the in-memory
    /// record is patched in place (no refetch) and the dirty flag cleared; on
    /// failure buffers, snapshot and dirty flag are untouched.
    pub async fn save_current(&mut self) -> Result<(), String> {
        let id = self
            .current_id
            .clone()
            .ok_or_else(|| "No note selected".to_string())?;

        self.backend
            .update_note(&id, &self.editor_title, &self.editor_text)
            .await?;

        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.title = self.editor_title.clone();
            note.text = self.editor_text.clone();
        }
        self.dirty = false;
        log::info!("Saved note {}", id);
        Ok(())
    }

    /// Delete the selected note, re-sync, and defensively drop the deleted id
    /// from the refreshed snapshot (the list endpoint can lag). Auto-selects
    /// the new first note, or clears the editor when none remain.
    pub async fn delete_current(&mut self) -> Result<(), String> {
        let id = self
            .current_id
            .clone()
            .ok_or_else(|| "No note selected".to_string())?;

        self.backend.delete_note(&id).await?;

        match self.backend.list_notes().await {
            Ok(fetched) => self.notes = fetched,
            Err(e) => log::warn!("Refresh after delete failed: {}", e),
        }
        self.notes.retain(|n| n.id != id);
        self.current_id = None;

        if let Some(first) = self.notes.first().map(|n| n.id.clone()) {
            self.select_local(&first);
        } else {
            self.editor_title.clear();
            self.editor_text.clear();
            self.dirty = false;
        }
        log::info!("Deleted note {}", id);
        Ok(())
    }

    /// Switch the editor to another note. Pure local operation; refuses to
    /// abandon unsaved edits unless `discard_changes` is set, leaving the
    /// editor untouched.
    pub fn select_note(&mut self, id: &str, discard_changes: bool) -> Result<(), String> {
        if self.dirty && !discard_changes {
            return Err("Unsaved changes; discard them to switch notes".to_string());
        }
        if !self.notes.iter().any(|n| n.id == id) {
            return Err(format!("No such note: {}", id));
        }
        self.select_local(id);
        Ok(())
    }

    /// Update the editor buffers from UI input, marking the session dirty.
    pub fn edit_buffers(&mut self, title: Option<String>, text: Option<String>) {
        let mut touched = false;
        if let Some(title) = title {
            self.editor_title = title;
            touched = true;
        }
        if let Some(text) = text {
            self.editor_text = text;
            touched = true;
        }
        if touched {
            self.dirty = true;
        }
    }

    fn select_local(&mut self, id: &str) {
        if let Some(note) = self.notes.iter().find(|n| n.id == id) {
            self.editor_title = note.title.clone();
            self.editor_text = note.text.clone();
            self.current_id = Some(note.id.clone());
            self.dirty = false;
        }
    }
}
