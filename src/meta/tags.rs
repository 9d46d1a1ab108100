//! Building the SEO tag set for a post.

use crate::config::SiteConfig;
use crate::meta::escape::escape_html;
use crate::posts::Post;
use crate::routing::encode_slug;

const DEFAULT_TITLE: &str = "Blog post";

/// Resolved, unescaped values for one post's head tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTags {
    pub title: String,
    pub page_title: String,
    pub description: String,
    pub image: String,
    pub canonical: String,
    pub site_name: String,
    pub published: Option<String>,
}

impl MetaTags {
    /// Apply defaults for every field the post leaves out.
    ///
    /// `requested_slug` is used for the canonical URL when the post does
    /// not carry its own slug.
    pub fn build(post: &Post, site: &SiteConfig, requested_slug: &str) -> Self {
        let origin = site.origin.trim_end_matches('/');
        let title = post.title().unwrap_or(DEFAULT_TITLE).to_string();
        let slug = post.slug().unwrap_or(requested_slug);

        Self {
            page_title: format!("{}{}{}", title, site.title_separator, site.name),
            title,
            description: post
                .excerpt()
                .unwrap_or(&site.default_description)
                .to_string(),
            image: post
                .image_url()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}{}", origin, site.placeholder_image)),
            canonical: format!(
                "{}{}?slug={}",
                origin,
                site.canonical_path,
                encode_slug(slug)
            ),
            site_name: site.name.clone(),
            published: post.published_at().map(str::to_string),
        }
    }

    /// Render the tags as one HTML fragment, in a fixed order.
    pub fn render(&self) -> String {
        let title = escape_html(&self.title);
        let desc = escape_html(&self.description);
        let image = escape_html(&self.image);
        let canonical = escape_html(&self.canonical);
        let site_name = escape_html(&self.site_name);

        let mut tags = vec![
            format!("<title>{}</title>", escape_html(&self.page_title)),
            format!(r#"<meta name="description" content="{desc}">"#),
            format!(r#"<link rel="canonical" href="{canonical}">"#),
            r#"<meta property="og:type" content="article">"#.to_string(),
            format!(r#"<meta property="og:site_name" content="{site_name}">"#),
            format!(r#"<meta property="og:title" content="{title}">"#),
            format!(r#"<meta property="og:description" content="{desc}">"#),
            format!(r#"<meta property="og:image" content="{image}">"#),
            format!(r#"<meta property="og:url" content="{canonical}">"#),
        ];
        if let Some(published) = &self.published {
            tags.push(format!(
                r#"<meta property="article:published_time" content="{}">"#,
                escape_html(published)
            ));
        }
        tags.extend([
            r#"<meta name="twitter:card" content="summary_large_image">"#.to_string(),
            format!(r#"<meta name="twitter:title" content="{title}">"#),
            format!(r#"<meta name="twitter:description" content="{desc}">"#),
            format!(r#"<meta name="twitter:image" content="{image}">"#),
        ]);

        tags.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig {
            origin: "https://example.com/".into(),
            name: "Jane Doe".into(),
            default_description: "Read this post by Jane Doe.".into(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_defaults_for_empty_post() {
        let tags = MetaTags::build(&Post::default(), &site(), "my slug");
        assert_eq!(tags.title, "Blog post");
        assert_eq!(tags.page_title, "Blog post — Jane Doe");
        assert_eq!(tags.description, "Read this post by Jane Doe.");
        assert_eq!(tags.image, "https://example.com/assets/images/resources/placeholder.jpg");
        assert_eq!(
            tags.canonical,
            "https://example.com/html/blog-detail.html?slug=my%20slug"
        );
        assert_eq!(tags.published, None);
    }

    #[test]
    fn test_post_values_win() {
        let post = Post {
            title: Some("Hello".into()),
            excerpt: Some("An intro".into()),
            image_url: Some("https://cdn.example.com/a.png".into()),
            slug: Some("hello".into()),
            published_at: Some("2024-01-02".into()),
            content_html: None,
        };
        let tags = MetaTags::build(&post, &site(), "ignored");
        assert_eq!(tags.image, "https://cdn.example.com/a.png");
        assert_eq!(tags.canonical, "https://example.com/html/blog-detail.html?slug=hello");
        assert_eq!(tags.published.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_canonical_keeps_url_marks() {
        let tags = MetaTags::build(&Post::default(), &site(), "what's (new)!");
        assert_eq!(
            tags.canonical,
            "https://example.com/html/blog-detail.html?slug=what's%20(new)!"
        );
    }

    #[test]
    fn test_render_order_and_escaping() {
        let post = Post {
            title: Some(r#"Fish & "Chips""#.into()),
            ..Post::default()
        };
        let html = MetaTags::build(&post, &site(), "fish").render();

        assert!(html.starts_with("<title>Fish &amp; &quot;Chips&quot; — Jane Doe</title>"));
        assert!(html.contains(
            r#"<meta property="og:title" content="Fish &amp; &quot;Chips&quot;">"#
        ));
        assert!(!html.contains("article:published_time"));
        assert!(html.ends_with(
            r#"<meta name="twitter:image" content="https://example.com/assets/images/resources/placeholder.jpg">"#
        ));

        let desc = html.find(r#"name="description""#).unwrap();
        let canonical = html.find(r#"rel="canonical""#).unwrap();
        let og_type = html.find("og:type").unwrap();
        let card = html.find("twitter:card").unwrap();
        assert!(desc < canonical && canonical < og_type && og_type < card);
    }

    #[test]
    fn test_render_published_before_twitter() {
        let post = Post {
            published_at: Some("2024-03-04T05:06:07Z".into()),
            ..Post::default()
        };
        let html = MetaTags::build(&post, &site(), "p").render();
        let published = html
            .find(r#"<meta property="article:published_time" content="2024-03-04T05:06:07Z">"#)
            .unwrap();
        assert!(published > html.find("og:url").unwrap());
        assert!(published < html.find("twitter:card").unwrap());
    }
}
