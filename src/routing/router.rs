//! Function lookup.
//!
//! # Responsibilities
//! - Store compiled function bindings
//! - Look up the binding for a request path
//! - Return matched binding or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical binding counts)
//! - First match wins; ties keep config order

use crate::config::{FunctionConfig, FunctionKind, InjectionMode};
use crate::routing::matcher::PathPrefixMatcher;

/// A function binding compiled from config.
#[derive(Debug, Clone)]
pub struct BoundFunction {
    pub name: String,
    pub kind: FunctionKind,
    pub rewrite_to: Option<String>,
    pub slug_prefix: String,
    pub mode: InjectionMode,
    matcher: PathPrefixMatcher,
    priority: u32,
}

/// Routes request paths to edge functions.
#[derive(Debug, Default)]
pub struct FunctionRouter {
    functions: Vec<BoundFunction>,
}

impl FunctionRouter {
    /// Compile bindings, highest priority first.
    pub fn from_config(configs: &[FunctionConfig]) -> Self {
        let mut functions: Vec<BoundFunction> = configs
            .iter()
            .map(|c| BoundFunction {
                name: c.name.clone(),
                kind: c.kind,
                rewrite_to: c.rewrite_to.clone(),
                slug_prefix: c.slug_prefix.clone(),
                mode: c.mode,
                matcher: PathPrefixMatcher::new(c.path_prefix.clone()),
                priority: c.priority,
            })
            .collect();

        // Stable sort keeps declaration order among equal priorities.
        functions.sort_by(|a, b| b.priority.cmp(&a.priority));

        Self { functions }
    }

    /// Find the function bound to `path`, if any.
    pub fn match_path(&self, path: &str) -> Option<&BoundFunction> {
        self.functions.iter().find(|f| f.matcher.matches(path))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
