//! Page metadata: title, description, keywords, Open Graph, canonical URL

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentType};
use crate::helpers::{canonical_link, full_url_for, item_url, meta_generator, meta_name, meta_property};

/// Open Graph fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub site_name: Option<String>,
    pub published_time: Option<String>,
}

/// Twitter card fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
}

/// Everything that goes in a page's `<head>` apart from structured data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub canonical: Option<String>,
    pub open_graph: Option<OpenGraph>,
    pub twitter: Option<TwitterCard>,
}

impl PageMetadata {
    /// Metadata for an item page
    pub fn for_item(config: &SiteConfig, kind: ContentType, item: &ContentItem) -> Self {
        let title = format!("{} | {}", item.title, config.title);
        let url = item_url(config, kind, &item.slug);

        let og_kind = match kind {
            ContentType::BlogPost | ContentType::Comparison => "article",
            ContentType::Faq => "website",
        };
        let published_time = match kind {
            ContentType::BlogPost => Some(item.date.clone()),
            _ => None,
        };

        Self {
            title: title.clone(),
            description: Some(item.description.clone()),
            keywords: join_keywords(&item.target_keywords),
            canonical: Some(url.clone()),
            open_graph: Some(OpenGraph {
                title,
                description: item.description.clone(),
                kind: og_kind.to_string(),
                url,
                site_name: None,
                published_time,
            }),
            twitter: None,
        }
    }

    /// Metadata for an item that does not exist
    pub fn not_found(config: &SiteConfig, kind: ContentType) -> Self {
        Self {
            title: format!("{} Not Found | {}", kind.noun(), config.title),
            description: None,
            keywords: None,
            canonical: None,
            open_graph: None,
            twitter: None,
        }
    }

    /// Site-wide defaults used by the home page
    pub fn home(config: &SiteConfig) -> Self {
        let title = format!("{} — {}", config.tagline, config.title);
        let url = config.base_url().to_string();

        Self {
            title: title.clone(),
            description: Some(config.description.clone()),
            keywords: join_keywords(&config.keywords),
            canonical: Some(url.clone()),
            open_graph: Some(OpenGraph {
                title: title.clone(),
                description: config.description.clone(),
                kind: "website".to_string(),
                url,
                site_name: Some(config.title.clone()),
                published_time: None,
            }),
            twitter: Some(TwitterCard {
                card: "summary_large_image".to_string(),
                title,
                description: config.description.clone(),
            }),
        }
    }

    /// Blog index page
    pub fn blog_index(config: &SiteConfig) -> Self {
        let title = format!("{} | {}", config.blog.title, config.title);
        let url = full_url_for(config, "/blog");

        Self {
            title: title.clone(),
            description: Some(config.blog.description.clone()),
            keywords: join_keywords(&config.blog.keywords),
            canonical: Some(url.clone()),
            open_graph: Some(OpenGraph {
                title,
                description: config.blog.description.clone(),
                kind: "website".to_string(),
                url,
                site_name: None,
                published_time: None,
            }),
            twitter: None,
        }
    }

    /// Render as `<head>` tags. The `<title>` element is included.
    pub fn to_html(&self) -> String {
        let mut tags = vec![format!(
            "<title>{}</title>",
            crate::helpers::html_escape(&self.title)
        )];

        if let Some(description) = &self.description {
            tags.push(meta_name("description", description));
        }
        if let Some(keywords) = &self.keywords {
            tags.push(meta_name("keywords", keywords));
        }
        if let Some(canonical) = &self.canonical {
            tags.push(canonical_link(canonical));
        }

        if let Some(og) = &self.open_graph {
            tags.push(meta_property("og:type", &og.kind));
            tags.push(meta_property("og:title", &og.title));
            if !og.description.is_empty() {
                tags.push(meta_property("og:description", &og.description));
            }
            tags.push(meta_property("og:url", &og.url));
            if let Some(site_name) = &og.site_name {
                tags.push(meta_property("og:site_name", site_name));
            }
            if let Some(published) = &og.published_time {
                tags.push(meta_property("article:published_time", published));
            }
        }

        if let Some(twitter) = &self.twitter {
            tags.push(meta_name("twitter:card", &twitter.card));
            tags.push(meta_name("twitter:title", &twitter.title));
            tags.push(meta_name("twitter:description", &twitter.description));
        }

        tags.push(meta_generator());
        tags.join("\n")
    }
}

fn join_keywords(keywords: &[String]) -> Option<String> {
    (!keywords.is_empty()).then(|| keywords.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn item() -> ContentItem {
        ContentItem {
            slug: "five-doctors".to_string(),
            title: "Five Doctors".to_string(),
            description: "What next".to_string(),
            content_type: "blog-post".to_string(),
            date: "2024-03-10T09:00:00.000Z".to_string(),
            content: "<p>x</p>".to_string(),
            target_keywords: vec!["a".to_string(), "b c".to_string()],
            idea_name: None,
            status: None,
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_blog_post_metadata() {
        let config = SiteConfig::default();
        let meta = PageMetadata::for_item(&config, ContentType::BlogPost, &item());

        assert_eq!(meta.title, "Five Doctors | SecondLook");
        assert_eq!(meta.keywords.as_deref(), Some("a, b c"));
        assert_eq!(
            meta.canonical.as_deref(),
            Some("https://secondlook.ai/blog/five-doctors")
        );
        let og = meta.open_graph.unwrap();
        assert_eq!(og.kind, "article");
        assert_eq!(og.published_time.as_deref(), Some("2024-03-10T09:00:00.000Z"));
    }

    #[test]
    fn test_comparison_and_faq_metadata() {
        let config = SiteConfig::default();

        let meta = PageMetadata::for_item(&config, ContentType::Comparison, &item());
        let og = meta.open_graph.unwrap();
        assert_eq!(og.kind, "article");
        assert_eq!(og.url, "https://secondlook.ai/compare/five-doctors");
        assert!(og.published_time.is_none());

        let meta = PageMetadata::for_item(&config, ContentType::Faq, &item());
        assert_eq!(meta.open_graph.unwrap().kind, "website");
    }

    #[test]
    fn test_no_keywords() {
        let config = SiteConfig::default();
        let mut it = item();
        it.target_keywords.clear();
        let meta = PageMetadata::for_item(&config, ContentType::BlogPost, &it);
        assert!(meta.keywords.is_none());
        assert!(!meta.to_html().contains("name=\"keywords\""));
    }

    #[test]
    fn test_not_found_titles() {
        let config = SiteConfig::default();
        assert_eq!(
            PageMetadata::not_found(&config, ContentType::BlogPost).title,
            "Post Not Found | SecondLook"
        );
        assert_eq!(
            PageMetadata::not_found(&config, ContentType::Comparison).title,
            "Comparison Not Found | SecondLook"
        );
        assert_eq!(
            PageMetadata::not_found(&config, ContentType::Faq).title,
            "FAQ Not Found | SecondLook"
        );
    }

    #[test]
    fn test_to_html() {
        let config = SiteConfig::default();
        let html = PageMetadata::for_item(&config, ContentType::BlogPost, &item()).to_html();
        assert!(html.starts_with("<title>Five Doctors | SecondLook</title>"));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://secondlook.ai/blog/five-doctors">"#));
        assert!(html.contains("article:published_time"));
    }

    #[test]
    fn test_home_has_twitter_card() {
        let config = SiteConfig::default();
        let html = PageMetadata::home(&config).to_html();
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"<meta property="og:site_name" content="SecondLook">"#));
    }
}
