//! Full-page generation from a post.

use crate::config::SiteConfig;
use crate::meta::escape::escape_html;
use crate::meta::tags::MetaTags;
use crate::posts::Post;

/// Render a standalone article page.
///
/// `contentHtml` comes from our own backend and is inserted verbatim.
pub fn render_page(post: &Post, tags: &MetaTags, site: &SiteConfig) -> String {
    let mut html = String::with_capacity(2048 + post.content_html().map_or(0, str::len));

    html.push_str("<!DOCTYPE html>");
    html.push_str(&format!(r#"<html lang="{}">"#, escape_html(&site.lang)));
    html.push_str("<head>");
    html.push_str(r#"<meta charset="utf-8">"#);
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    html.push_str(&tags.render());
    for href in &site.stylesheets {
        html.push_str(&format!(r#"<link rel="stylesheet" href="{}">"#, escape_html(href)));
    }
    html.push_str("</head>");

    html.push_str("<body><article class=\"post\">");
    html.push_str(&format!("<h1 data-post-title>{}</h1>", escape_html(&tags.title)));
    if let Some(published) = &tags.published {
        let published = escape_html(published);
        html.push_str(&format!(r#"<time datetime="{published}">{published}</time>"#));
    }
    html.push_str("<div class=\"post-content\">");
    match post.content_html() {
        Some(content) => html.push_str(content),
        None => html.push_str(&format!("<p>{}</p>", escape_html(&tags.description))),
    }
    html.push_str("</div></article></body></html>");

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_page() {
        let site = SiteConfig {
            stylesheets: vec!["/css/site.css".into()],
            ..SiteConfig::default()
        };
        let post = Post {
            title: Some("Generated".into()),
            content_html: Some("<p>Body <em>text</em></p>".into()),
            published_at: Some("2024-06-01".into()),
            ..Post::default()
        };
        let tags = MetaTags::build(&post, &site, "generated");
        let html = render_page(&post, &tags, &site);

        assert!(html.starts_with(r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8">"#));
        assert!(html.contains("<title>Generated — Blog</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="/css/site.css"></head>"#));
        assert!(html.contains("<h1 data-post-title>Generated</h1>"));
        assert!(html.contains(r#"<time datetime="2024-06-01">2024-06-01</time>"#));
        assert!(html.contains("<p>Body <em>text</em></p>"));
        assert!(html.ends_with("</article></body></html>"));
    }

    #[test]
    fn test_generated_page_without_content() {
        let site = SiteConfig::default();
        let post = Post {
            excerpt: Some("Only <an> excerpt".into()),
            ..Post::default()
        };
        let tags = MetaTags::build(&post, &site, "x");
        let html = render_page(&post, &tags, &site);
        assert!(html.contains("<p>Only &lt;an&gt; excerpt</p>"));
        assert!(!html.contains("<time"));
    }
}
