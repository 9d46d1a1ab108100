//! Path matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if the path starts with this prefix.
    ///
    /// A prefix ending in `/` also matches the bare directory path, so
    /// `/blog/` matches `/blog`.
    pub fn matches(&self, path: &str) -> bool {
        if path.starts_with(&self.prefix) {
            return true;
        }
        match self.prefix.strip_suffix('/') {
            Some(dir) if !dir.is_empty() => path == dir,
            _ => false,
        }
    }
}
