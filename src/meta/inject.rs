//! Writing tags into an existing page.
//!
//! Pages come from our own static site, so the rewrite works on the raw
//! markup with a handful of patterns instead of a full HTML parser. Only
//! the `<head>` section is searched for existing SEO tags.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::meta::escape::escape_html;

fn head_open() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<head(?:\s[^>]*)?>").expect("constant pattern should parse")
    })
}

fn head_close() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)</head\s*>").expect("constant pattern should parse")
    })
}

fn seo_tags() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?is)<title\b[^>]*>.*?</title\s*>",
            r#"|<meta\b[^>]*\b(?:name|property)\s*=\s*["']?(?:description|og:[^"'\s>]*|twitter:[^"'\s>]*|article:[^"'\s>]*)["']?[^>]*>"#,
            r#"|<link\b[^>]*\brel\s*=\s*["']?canonical["']?[^>]*>"#,
        ))
        .expect("constant pattern should parse")
    })
}

fn post_title_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<([a-z][a-z0-9-]*)\b[^>]*\sdata-post-title\b[^>]*>")
            .expect("constant pattern should parse")
    })
}

/// Byte range of the head element's contents, between its tags.
///
/// An unclosed head runs until `<body` or the end of the document.
fn head_contents(html: &str) -> Option<Range<usize>> {
    let open = head_open().find(html)?;
    let rest = &html[open.end()..];
    let end = match head_close().find(rest) {
        Some(close) => open.end() + close.start(),
        None => match rest.to_ascii_lowercase().find("<body") {
            Some(body) => open.end() + body,
            None => html.len(),
        },
    };
    Some(open.end()..end)
}

/// Insert `fragment` at the end of the head section.
///
/// Without a closing tag the fragment goes right after `<head>`. Pages with
/// no head element are returned unchanged.
pub fn append_to_head(html: &str, fragment: &str) -> String {
    let at = match head_close().find(html) {
        Some(close) => close.start(),
        None => match head_open().find(html) {
            Some(open) => open.end(),
            None => return html.to_string(),
        },
    };

    let mut out = String::with_capacity(html.len() + fragment.len());
    out.push_str(&html[..at]);
    out.push_str(fragment);
    out.push_str(&html[at..]);
    out
}

/// Remove title, description, canonical and social tags from the head.
pub fn strip_seo_tags(html: &str) -> String {
    let Some(range) = head_contents(html) else {
        return html.to_string();
    };

    let head = &html[range.clone()];
    let stripped = seo_tags().replace_all(head, "");

    let mut out = String::with_capacity(html.len());
    out.push_str(&html[..range.start]);
    out.push_str(&stripped);
    out.push_str(&html[range.end..]);
    out
}

/// Replace the content of every `data-post-title` element with `title`.
///
/// Elements without a closing tag are left alone.
pub fn set_post_title(html: &str, title: &str) -> String {
    let escaped = escape_html(title);
    let mut out = String::with_capacity(html.len() + title.len());
    let mut cursor = 0;

    for caps in post_title_placeholder().captures_iter(html) {
        let (Some(open), Some(tag)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // Nested inside a placeholder already replaced.
        if open.start() < cursor {
            continue;
        }
        let Some(content_end) = matching_close(html, open.end(), tag.as_str()) else {
            continue;
        };

        out.push_str(&html[cursor..open.end()]);
        out.push_str(&escaped);
        cursor = content_end;
    }

    out.push_str(&html[cursor..]);
    out
}

/// Start of the closing tag that balances an element opened before `from`.
fn matching_close(html: &str, from: usize, tag: &str) -> Option<usize> {
    let pattern = Regex::new(&format!(r"(?i)<(/?){}(?:\s[^>]*)?>", regex::escape(tag))).ok()?;
    let mut depth = 1usize;

    for caps in pattern.captures_iter(&html[from..]) {
        let whole = caps.get(0)?;
        if caps.get(1).is_some_and(|slash| !slash.is_empty()) {
            depth -= 1;
            if depth == 0 {
                return Some(from + whole.start());
            }
        } else {
            depth += 1;
        }
    }
    None
}
