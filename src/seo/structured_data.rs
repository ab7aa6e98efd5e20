//! schema.org JSON-LD documents

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentType};
use crate::helpers::{full_url_for, html_unescape, item_url, strip_html};

lazy_static! {
    /// A heading followed directly by a paragraph
    static ref QA_PATTERN: Regex =
        Regex::new(r"<h[23][^>]*>(.*?)</h[23]>\s*<p>(.*?)</p>").expect("valid regex");
}

/// One question/answer pair extracted from FAQ HTML
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Pull question/answer pairs out of rendered FAQ content.
/// Each `<h2>`/`<h3>` immediately followed by a `<p>` is one pair.
pub fn extract_qa_pairs(html: &str) -> Vec<QaPair> {
    QA_PATTERN
        .captures_iter(html)
        .map(|caps| QaPair {
            question: plain_text(&caps[1]),
            answer: plain_text(&caps[2]),
        })
        .collect()
}

fn plain_text(fragment: &str) -> String {
    html_unescape(strip_html(fragment).trim())
}

fn organization_ref(config: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": config.title,
    })
}

/// Site owner
pub fn organization(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": config.title,
        "url": config.base_url(),
        "description": config.description,
    })
}

/// Site with a search action
pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.title,
        "url": config.base_url(),
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}?q={{search_term_string}}", full_url_for(config, "/search")),
            "query-input": "required name=search_term_string",
        },
    })
}

/// Blog index
pub fn blog(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Blog",
        "name": format!("{} Blog", config.title),
        "description": config.blog.description,
        "url": full_url_for(config, "/blog"),
    })
}

/// Blog posts and comparisons
pub fn article(config: &SiteConfig, kind: ContentType, item: &ContentItem) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": item.title,
        "description": item.description,
        "datePublished": item.date,
        "author": organization_ref(config),
        "publisher": {
            "@type": "Organization",
            "name": config.title,
            "url": config.base_url(),
        },
        "url": item_url(config, kind, &item.slug),
    })
}

fn question_entities<'a, I>(pairs: I) -> Vec<Value>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(question, answer)| {
            json!({
                "@type": "Question",
                "name": question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": answer,
                },
            })
        })
        .collect()
}

/// FAQ pages, with questions taken from the rendered content
pub fn faq_page(config: &SiteConfig, item: &ContentItem) -> Value {
    let pairs = extract_qa_pairs(&item.content);
    let main_entity =
        question_entities(pairs.iter().map(|qa| (qa.question.as_str(), qa.answer.as_str())));

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "name": item.title,
        "description": item.description,
        "url": item_url(config, ContentType::Faq, &item.slug),
        "mainEntity": main_entity,
    })
}

/// Home page questions from configuration; `None` when there are none
pub fn home_faq(config: &SiteConfig) -> Option<Value> {
    if config.home_faq.is_empty() {
        return None;
    }

    let main_entity = question_entities(
        config
            .home_faq
            .iter()
            .map(|entry| (entry.question.as_str(), entry.answer.as_str())),
    );
    Some(json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": main_entity,
    }))
}

/// The document that belongs on an item page
pub fn for_item(config: &SiteConfig, kind: ContentType, item: &ContentItem) -> Value {
    match kind {
        ContentType::BlogPost | ContentType::Comparison => article(config, kind, item),
        ContentType::Faq => faq_page(config, item),
    }
}

/// Wrap a document in a script element. `</` is escaped so text inside
/// the JSON cannot close the element early.
pub fn json_ld_script(schema: &Value) -> String {
    let json = schema.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownRenderer;
    use indexmap::IndexMap;

    fn item(slug: &str, content: &str) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            title: "Common Questions".to_string(),
            description: "Answers".to_string(),
            content_type: "faq".to_string(),
            date: "2024-05-01T00:00:00.000Z".to_string(),
            content: content.to_string(),
            target_keywords: Vec::new(),
            idea_name: None,
            status: None,
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_extract_qa_pairs() {
        let html = "<h2>What is <em>SecondLook</em>?</h2>\n<p>An <strong>AI</strong> case organizer.</p>\n\
                    <h3 id=\"cost\">Is it free?</h3>\n\n<p>Early access is.</p>\n\
                    <h2>Orphan heading</h2>\n<ul><li>list, not a paragraph</li></ul>";
        let pairs = extract_qa_pairs(html);
        assert_eq!(
            pairs,
            vec![
                QaPair {
                    question: "What is SecondLook?".to_string(),
                    answer: "An AI case organizer.".to_string(),
                },
                QaPair {
                    question: "Is it free?".to_string(),
                    answer: "Early access is.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_faq_from_markdown() {
        let html = MarkdownRenderer::new()
            .render("## Can I upload lab results?\n\nYes, PDFs & images.\n\n## Who sees my data?\n\nOnly you.\n")
            .unwrap();
        let config = SiteConfig::default();
        let schema = faq_page(&config, &item("data", &html));

        assert_eq!(schema["@type"], "FAQPage");
        assert_eq!(schema["url"], "https://secondlook.ai/faq/data");
        let entities = schema["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0]["name"], "Can I upload lab results?");
        assert_eq!(entities[0]["acceptedAnswer"]["text"], "Yes, PDFs & images.");
    }

    #[test]
    fn test_article() {
        let config = SiteConfig::default();
        let schema = article(&config, ContentType::Comparison, &item("vs", "<p>x</p>"));
        assert_eq!(schema["@type"], "Article");
        assert_eq!(schema["headline"], "Common Questions");
        assert_eq!(schema["datePublished"], "2024-05-01T00:00:00.000Z");
        assert_eq!(schema["author"]["name"], "SecondLook");
        assert_eq!(schema["publisher"]["url"], "https://secondlook.ai");
        assert_eq!(schema["url"], "https://secondlook.ai/compare/vs");
    }

    #[test]
    fn test_home_faq() {
        let mut config = SiteConfig::default();
        let schema = home_faq(&config).unwrap();
        assert_eq!(schema["@type"], "FAQPage");
        let entities = schema["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), 4);
        assert_eq!(entities[1]["name"], "Where to go when no one can diagnose you?");
        assert_eq!(entities[1]["acceptedAnswer"]["@type"], "Answer");

        config.home_faq.clear();
        assert!(home_faq(&config).is_none());
    }

    #[test]
    fn test_website_search_action() {
        let schema = website(&SiteConfig::default());
        assert_eq!(
            schema["potentialAction"]["target"],
            "https://secondlook.ai/search?q={search_term_string}"
        );
    }

    #[test]
    fn test_json_ld_script_escapes_closing_tags() {
        let schema = json!({ "name": "</script><script>alert(1)</script>" });
        let script = json_ld_script(&schema);
        assert!(script.starts_with(r#"<script type="application/ld+json">"#));
        assert_eq!(script.matches("</script>").count(), 1);
    }
}
