//! Head metadata subsystem.
//!
//! # Data Flow
//! ```text
//! Post + SiteConfig
//!     → tags.rs (defaults, canonical URL, escaped tag fragment)
//!     → inject.rs (append / replace into the origin page)
//!       or generate.rs (standalone page)
//!     → rewritten HTML
//! ```

pub mod escape;
pub mod generate;
pub mod inject;
pub mod tags;

pub use escape::escape_html;
pub use generate::render_page;
pub use tags::MetaTags;

use crate::config::{InjectionMode, SiteConfig};
use crate::posts::Post;

/// Rewrite an origin page for `post` using `mode`.
///
/// `Generate` discards `html` and renders a fresh page.
pub fn transform(
    html: &str,
    post: &Post,
    site: &SiteConfig,
    slug: &str,
    mode: InjectionMode,
) -> String {
    let tags = MetaTags::build(post, site, slug);
    match mode {
        InjectionMode::Append => {
            let page = inject::append_to_head(html, &tags.render());
            inject::set_post_title(&page, &tags.title)
        }
        InjectionMode::Replace => {
            let page = inject::strip_seo_tags(html);
            let page = inject::append_to_head(&page, &tags.render());
            inject::set_post_title(&page, &tags.title)
        }
        InjectionMode::Generate => render_page(post, &tags, site),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<html><head><title>Old</title><meta property=\"og:title\" content=\"Old\"></head>\
                        <body><h2 data-post-title>…</h2></body></html>";

    fn post() -> Post {
        Post {
            title: Some("New".into()),
            slug: Some("new".into()),
            ..Post::default()
        }
    }

    #[test]
    fn test_append_keeps_existing_tags() {
        let out = transform(PAGE, &post(), &SiteConfig::default(), "new", InjectionMode::Append);
        assert!(out.contains("<title>Old</title>"));
        assert!(out.contains("<title>New — Blog</title>"));
        assert!(out.contains("<h2 data-post-title>New</h2>"));
        assert_eq!(out.matches("</head>").count(), 1);
    }

    #[test]
    fn test_replace_removes_existing_tags() {
        let out = transform(PAGE, &post(), &SiteConfig::default(), "new", InjectionMode::Replace);
        assert!(!out.contains("Old"));
        assert_eq!(out.matches("<title>").count(), 1);
        assert_eq!(out.matches("og:title").count(), 1);
        assert!(out.contains("<h2 data-post-title>New</h2>"));
    }

    #[test]
    fn test_generate_ignores_origin() {
        let out = transform(PAGE, &post(), &SiteConfig::default(), "new", InjectionMode::Generate);
        assert!(!out.contains("Old"));
        assert!(out.starts_with("<!DOCTYPE html>"));
    }
}
