//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;
use crate::content::ContentType;

/// Characters that must be escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog") // -> "https://secondlook.ai/blog"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        config.base_url().to_string()
    } else {
        format!("{}/{}", config.base_url(), path)
    }
}

/// Site-relative path of an item page, e.g. `/compare/secondlook-vs-x`
pub fn item_path(kind: ContentType, slug: &str) -> String {
    format!("/{}/{}", kind.route(), encode_segment(slug))
}

/// Absolute URL of an item page
pub fn item_url(config: &SiteConfig, kind: ContentType, slug: &str) -> String {
    full_url_for(config, &item_path(kind, slug))
}

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, "/blog"), "https://example.com/blog");
        assert_eq!(full_url_for(&config, "/"), "https://example.com");
    }

    #[test]
    fn test_item_url() {
        let config = test_config();
        assert_eq!(
            item_url(&config, ContentType::Comparison, "secondlook-vs-webmd"),
            "https://example.com/compare/secondlook-vs-webmd"
        );
        assert_eq!(item_path(ContentType::Faq, "what is it"), "/faq/what%20is%20it");
    }
}
