//! Export/import helpers: sanitized .md download payloads and titles
//! derived from uploaded filenames.

/// Characters that never survive into a download filename.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Extensions stripped (once, case-insensitively) when deriving a title
/// from an imported file's name.
const IMPORT_EXTENSIONS: &[&str] = &[".md", ".markdown", ".txt"];

/// Download filename for a note title: invalid characters replaced with `-`,
/// `.md` appended. An empty title exports as `Untitled.md`.
pub fn export_filename(title: &str) -> String {
    let title = if title.is_empty() { "Untitled" } else { title };
    let sanitized: String = title
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();
    format!("{}.md", sanitized)
}

/// Decode the HTML entities the preview pipeline produces back to raw text,
/// `&amp;` last so freshly decoded `&`s are not re-interpreted.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Note title for an imported file: the filename minus one trailing known
/// extension.
pub fn import_title(filename: &str) -> String {
    for ext in IMPORT_EXTENSIONS {
        let Some(cut) = filename.len().checked_sub(ext.len()) else {
            continue;
        };
        if filename.is_char_boundary(cut) && filename[cut..].eq_ignore_ascii_case(ext) {
            return filename[..cut].to_string();
        }
    }
    filename.to_string()
}
