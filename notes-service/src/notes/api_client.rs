//! Typed HTTP client for the torn.com private notes endpoints.
//!
//! Authentication is ambient: the browser session cookie, if configured, is
//! forwarded verbatim. No retries, no timeouts — a hung request stays hung.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use torn_notes_types::Note;

/// The four remote operations the drawer session runs against.
///
/// Implemented by [`NotesApiClient`] for the live site; tests supply an
/// in-memory fake.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, String>;
    async fn create_note(&self, title: &str, text: &str) -> Result<Note, String>;
    async fn update_note(&self, id: &str, title: &str, text: &str) -> Result<(), String>;
    async fn delete_note(&self, id: &str) -> Result<(), String>;
}

// ── Wire types ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct NotesEnvelope {
    // A well-formed response without a `notes` field degrades to empty
    #[serde(default)]
    notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
struct CreateNoteBody<'a> {
    title: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateNoteBody<'a> {
    #[serde(rename = "lastModifiedTimestamp")]
    last_modified_timestamp: i64,
    title: &'a str,
    text: &'a str,
}

// ── Client impl ─────────────────────────────────────

pub struct NotesApiClient {
    base_url: String,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

impl NotesApiClient {
    pub fn new(base_url: &str, session_cookie: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
            client: reqwest::Client::new(),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/chat/notes", self.base_url)
    }

    fn with_session(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => req.header("Cookie", cookie.as_str()),
            None => req,
        }
    }
}

#[async_trait]
impl NotesBackend for NotesApiClient {
    async fn list_notes(&self) -> Result<Vec<Note>, String> {
        let resp = self
            .with_session(self.client.get(self.notes_url()))
            .send()
            .await
            .map_err(|e| format!("List notes failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("List notes HTTP {}: {}", status, body));
        }

        let envelope: NotesEnvelope = resp
            .json()
            .await
            .map_err(|e| format!("Parse notes response: {}", e))?;

        Ok(envelope.notes)
    }

    async fn create_note(&self, title: &str, text: &str) -> Result<Note, String> {
        let resp = self
            .with_session(self.client.post(self.notes_url()))
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&CreateNoteBody { title, text })
            .send()
            .await
            .map_err(|e| format!("Create note failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Create note HTTP {}: {}", status, body));
        }

        resp.json::<Note>()
            .await
            .map_err(|e| format!("Parse created note: {}", e))
    }

    async fn update_note(&self, id: &str, title: &str, text: &str) -> Result<(), String> {
        let body = UpdateNoteBody {
            last_modified_timestamp: chrono::Utc::now().timestamp_millis(),
            title,
            text,
        };
        let payload =
            serde_json::to_string(&body).map_err(|e| format!("Encode note update: {}", e))?;

        // The site expects the JSON payload under a text/plain content type
        let resp = self
            .with_session(self.client.put(format!("{}/{}", self.notes_url(), id)))
            .header("Content-Type", "text/plain;charset=UTF-8")
            .body(payload)
            .send()
            .await
            .map_err(|e| format!("Save note failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Save note HTTP {}: {}", status, body));
        }

        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), String> {
        let resp = self
            .with_session(self.client.delete(format!("{}/{}", self.notes_url(), id)))
            .send()
            .await
            .map_err(|e| format!("Delete note failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Delete note HTTP {}: {}", status, body));
        }

        Ok(())
    }
}
