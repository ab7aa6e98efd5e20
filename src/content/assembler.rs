//! Turns raw file text into a normalized [`ContentItem`]

use super::frontmatter::scalar_to_string;
use super::item::now_iso8601;
use super::{ContentError, ContentItem, ContentType, FrontMatter, MarkdownRenderer};

/// Split front-matter from body, render the body and fill every field.
///
/// `requested` only supplies the default `type` label; front-matter `type`
/// wins when present.
pub fn assemble(
    renderer: &MarkdownRenderer,
    requested: ContentType,
    slug: &str,
    raw: &str,
) -> Result<ContentItem, ContentError> {
    let (fm, body) = FrontMatter::parse(raw)?;
    let content = renderer.render(body)?;

    let mut extra = indexmap::IndexMap::with_capacity(fm.extra.len());
    for (key, value) in fm.extra {
        match scalar_to_string(&value) {
            Some(text) => {
                extra.insert(key, text);
            }
            None => tracing::debug!("Skipping non-scalar front-matter key {:?} in {}", key, slug),
        }
    }

    Ok(ContentItem {
        slug: slug.to_string(),
        title: non_empty(fm.title).unwrap_or_default(),
        description: non_empty(fm.description).unwrap_or_default(),
        content_type: non_empty(fm.content_type).unwrap_or_else(|| requested.label().to_string()),
        date: non_empty(fm.date).unwrap_or_else(now_iso8601),
        content,
        target_keywords: fm.target_keywords,
        idea_name: fm.idea_name,
        status: fm.status,
        extra,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::item::parse_date_string;

    const FULL: &str = r#"---
title: When 5 Doctors Can't Diagnose You
description: A practical guide
type: guide
date: 2024-03-10T09:00:00.000Z
targetKeywords:
  - diagnostic odyssey support
  - medical self advocacy
ideaName: secondlook
status: live
author: Care Team
---

## Start with your records

Gather every result.
"#;

    #[test]
    fn test_full_metadata_round_trips() {
        let renderer = MarkdownRenderer::new();
        let item = assemble(&renderer, ContentType::BlogPost, "five-doctors", FULL).unwrap();

        assert_eq!(item.slug, "five-doctors");
        assert_eq!(item.title, "When 5 Doctors Can't Diagnose You");
        assert_eq!(item.description, "A practical guide");
        assert_eq!(item.content_type, "guide");
        assert_eq!(item.date, "2024-03-10T09:00:00.000Z");
        assert_eq!(
            item.target_keywords,
            vec!["diagnostic odyssey support", "medical self advocacy"]
        );
        assert_eq!(item.idea_name.as_deref(), Some("secondlook"));
        assert_eq!(item.status.as_deref(), Some("live"));
        assert_eq!(item.extra.get("author").map(String::as_str), Some("Care Team"));
        assert!(item.content.contains("<h2>Start with your records</h2>"));
        assert!(item.content.contains("<p>Gather every result.</p>"));
    }

    #[test]
    fn test_defaults_when_metadata_missing() {
        let renderer = MarkdownRenderer::new();
        let item = assemble(&renderer, ContentType::Faq, "bare", "Just a body.").unwrap();

        assert_eq!(item.title, "");
        assert_eq!(item.description, "");
        assert_eq!(item.content_type, "faq");
        assert!(item.target_keywords.is_empty());
        assert!(item.idea_name.is_none());
        assert!(item.status.is_none());
        assert!(parse_date_string(&item.date).is_some());
        assert_eq!(item.content.trim(), "<p>Just a body.</p>");
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let renderer = MarkdownRenderer::new();
        let raw = "---\ntitle: ''\ntype: ''\ndate: ''\n---\nx";
        let item = assemble(&renderer, ContentType::Comparison, "c", raw).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.content_type, "comparison");
        assert!(parse_date_string(&item.date).is_some());
    }

    #[test]
    fn test_non_scalar_extra_is_dropped() {
        let renderer = MarkdownRenderer::new();
        let raw = "---\ntitle: T\nsources:\n  - a\n  - b\nreviewed: true\n---\nx";
        let item = assemble(&renderer, ContentType::BlogPost, "t", raw).unwrap();
        assert!(!item.extra.contains_key("sources"));
        assert_eq!(item.extra.get("reviewed").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_spaced_fence_is_still_front_matter() {
        let renderer = MarkdownRenderer::new();
        let raw = "---  \ntitle: Spaced Fence\ndate: 2024-01-01\n---\nBody text\n";
        let item = assemble(&renderer, ContentType::BlogPost, "spaced", raw).unwrap();
        assert_eq!(item.title, "Spaced Fence");
        assert_eq!(item.date, "2024-01-01");
        assert_eq!(item.content, "<p>Body text</p>\n");
    }

    #[test]
    fn test_malformed_front_matter_fails() {
        let renderer = MarkdownRenderer::new();
        let raw = "---\ntitle: : :\n  bad: [\n---\nx";
        assert!(assemble(&renderer, ContentType::BlogPost, "bad", raw).is_err());
    }
}
