//! Markdown → HTML rendering for the drawer preview.
//!
//! A fixed, ordered pipeline of regex substitutions over the whole running
//! string — no tokenizer, no AST, no nested structures. Later passes operate
//! on the HTML emitted by earlier ones (blockquotes match the already-escaped
//! `&gt;`, never a raw `>`), so the pass order is load-bearing.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Fragment returned for empty input.
pub const EMPTY_PREVIEW: &str = r#"<p style="color: #888;">Preview will appear here...</p>"#;

static FENCED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

// Longest marker first, so `###` is not eaten by the `#` rule
static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^### (.*)$").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^## (.*)$").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^# (.*)$").unwrap());

static BOLD_STARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static BOLD_UNDERS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
static ITALIC_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static ITALIC_UNDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static HR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^---$").unwrap());

static UL_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^\* (.+)$").unwrap());
static UL_DASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^- (.+)$").unwrap());
static OL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^\d+\. (.+)$").unwrap());

// Merge only strictly adjacent list markup (at most one newline between),
// so a blank line keeps two bullets in separate lists
static UL_MERGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</ul>\n?<ul>").unwrap());
static OL_MERGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</ol>\n?<ol>").unwrap());

// Escaping runs first, so blockquote markers arrive here as `&gt; `
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?im)^&gt; (.*)$").unwrap());
static QUOTE_JOIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</blockquote>\n?<blockquote>").unwrap());

static BLOCK_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<[houpb]").unwrap());

/// Render Markdown to preview HTML. Total: never fails, empty input yields
/// [`EMPTY_PREVIEW`].
pub fn render(markdown: &str) -> String {
    if markdown.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    // 1. HTML metacharacters, `&` first to avoid double-escaping
    let escaped = markdown
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    // 2. Fenced code blocks are parked behind NUL markers so the remaining
    //    passes leave their (already escaped) content untouched
    let mut fences: Vec<String> = Vec::new();
    let mut html = FENCED_CODE_RE
        .replace_all(&escaped, |caps: &Captures| {
            fences.push(caps[1].to_string());
            format!("\u{0}{}\u{0}", fences.len() - 1)
        })
        .into_owned();

    // 3. Inline code
    html = INLINE_CODE_RE.replace_all(&html, "<code>$1</code>").into_owned();

    // 4. Headers
    html = H3_RE.replace_all(&html, "<h3>$1</h3>").into_owned();
    html = H2_RE.replace_all(&html, "<h2>$1</h2>").into_owned();
    html = H1_RE.replace_all(&html, "<h1>$1</h1>").into_owned();

    // 5. Bold, then 6. italic, so leftover single markers read as italic
    html = BOLD_STARS_RE.replace_all(&html, "<strong>$1</strong>").into_owned();
    html = BOLD_UNDERS_RE.replace_all(&html, "<strong>$1</strong>").into_owned();
    html = ITALIC_STAR_RE.replace_all(&html, "<em>$1</em>").into_owned();
    html = ITALIC_UNDER_RE.replace_all(&html, "<em>$1</em>").into_owned();

    // 7. Links, url passed through verbatim
    html = LINK_RE
        .replace_all(&html, r#"<a href="$2" target="_blank">$1</a>"#)
        .into_owned();

    // 8. Horizontal rule
    html = HR_RE.replace_all(&html, "<hr>").into_owned();

    // 9./10. Each list line becomes its own one-item list, then adjacent
    //        lists collapse into one
    html = UL_STAR_RE.replace_all(&html, "<ul><li>$1</li></ul>").into_owned();
    html = UL_DASH_RE.replace_all(&html, "<ul><li>$1</li></ul>").into_owned();
    html = OL_RE.replace_all(&html, "<ol><li>$1</li></ol>").into_owned();
    html = UL_MERGE_RE.replace_all(&html, "").into_owned();
    html = OL_MERGE_RE.replace_all(&html, "").into_owned();

    // 11. Blockquotes; adjacent quotes are joined with a break, not merged
    html = QUOTE_RE.replace_all(&html, "<blockquote>$1</blockquote>").into_owned();
    html = QUOTE_JOIN_RE.replace_all(&html, "<br>").into_owned();

    // 12. Paragraph boundaries, then remaining single newlines
    html = html.replace("\n\n", "</p><p>");
    html = html.replace('\n', "<br>");

    // Put fenced blocks back before deciding on the paragraph wrap: `<pre`
    // passes the block-start letter check the same way `<p>` does
    for (i, body) in fences.iter().enumerate() {
        let marker = format!("\u{0}{}\u{0}", i);
        html = html.replace(&marker, &format!("<pre><code>{}</code></pre>", body));
    }

    // 13. Wrap in a paragraph unless the result already opens with a
    //     block-level tag
    if !BLOCK_START_RE.is_match(&html) {
        html = format!("<p>{}</p>", html);
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_renders_placeholder() {
        assert_eq!(render(""), EMPTY_PREVIEW);
    }

    #[test]
    fn header_is_not_paragraph_wrapped() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("## Sub"), "<h2>Sub</h2>");
        assert_eq!(render("### Deep"), "<h3>Deep</h3>");
    }

    #[test]
    fn four_hashes_is_not_a_header() {
        let html = render("#### nope");
        assert!(!html.contains("<h"));
        assert!(html.contains("#### nope"));
    }

    #[test]
    fn bold_and_italic() {
        let html = render("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong> and <em>italic</em>"));
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn underscore_emphasis() {
        let html = render("__b__ and _i_");
        assert!(html.contains("<strong>b</strong> and <em>i</em>"));
    }

    #[test]
    fn fenced_block_keeps_newlines_and_escaping() {
        assert_eq!(
            render("```code\nline```"),
            "<pre><code>code\nline</code></pre>"
        );
        assert_eq!(render("```<b>```"), "<pre><code>&lt;b&gt;</code></pre>");
    }

    #[test]
    fn inline_code() {
        let html = render("use `foo()` here");
        assert!(html.contains("<code>foo()</code>"));
    }

    #[test]
    fn adjacent_bullets_form_one_list() {
        let html = render("- a\n- b");
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn blank_line_splits_lists() {
        let html = render("- a\n\n- b");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn star_bullets_and_ordered_lists_merge() {
        assert_eq!(render("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(render("1. one\n2. two"), "<ol><li>one</li><li>two</li></ol>");
    }

    #[test]
    fn metacharacters_are_always_escaped() {
        let html = render("a & b < c > d");
        assert!(html.contains("a &amp; b &lt; c &gt; d"));
        assert!(!html.contains("b < c"));
    }

    #[test]
    fn blockquotes_join_with_break() {
        assert_eq!(render("> a\n> b"), "<blockquote>a<br>b</blockquote>");
    }

    #[test]
    fn link_opens_in_new_context() {
        let html = render("[site](https://example.com)");
        assert!(html.contains(r#"<a href="https://example.com" target="_blank">site</a>"#));
    }

    #[test]
    fn horizontal_rule() {
        assert_eq!(render("---"), "<hr>");
    }

    #[test]
    fn paragraph_and_line_breaks() {
        assert_eq!(render("a\n\nb"), "<p>a</p><p>b</p>");
        assert_eq!(render("a\nb"), "<p>a<br>b</p>");
    }
}
