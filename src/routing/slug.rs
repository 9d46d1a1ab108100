//! Slug resolution.
//!
//! A post is addressed either as `?slug=<value>` on any bound path or as
//! the remainder of a pretty URL such as `/blog/<value>/`. The query
//! parameter wins when both are present.

use url::form_urlencoded;

/// Query parameter carrying the slug.
pub const SLUG_PARAM: &str = "slug";

/// Extract the post slug from a request path and optional query string.
///
/// Returns `None` when no non-empty slug can be found or when the path
/// segment is not valid percent-encoded UTF-8.
pub fn extract_slug(path: &str, query: Option<&str>, slug_prefix: &str) -> Option<String> {
    if let Some(query) = query {
        let from_query = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| *key == SLUG_PARAM)
            .map(|(_, value)| value.into_owned());
        if let Some(slug) = from_query.filter(|s| !s.is_empty()) {
            return Some(slug);
        }
    }

    let rest = path.strip_prefix(slug_prefix)?;
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() {
        return None;
    }

    match urlencoding::decode(rest) {
        Ok(decoded) if !decoded.is_empty() => Some(decoded.into_owned()),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Slug is not valid UTF-8");
            None
        }
    }
}

// Marks left literal in URL components alongside the alphanumerics and `-_.~`.
const LITERAL_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a slug for use as one URL component.
pub fn encode_slug(slug: &str) -> String {
    LITERAL_MARKS
        .iter()
        .fold(urlencoding::encode(slug).into_owned(), |acc, (escaped, mark)| {
            acc.replace(escaped, mark)
        })
}
