//! Content item model

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The recognized content categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    BlogPost,
    Comparison,
    Faq,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::BlogPost,
        ContentType::Comparison,
        ContentType::Faq,
    ];

    /// Look up a type by its label; unknown labels have no type
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "blog-post" => Some(ContentType::BlogPost),
            "comparison" => Some(ContentType::Comparison),
            "faq" => Some(ContentType::Faq),
            _ => None,
        }
    }

    /// Label stored on items and accepted by the public API
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog-post",
            ContentType::Comparison => "comparison",
            ContentType::Faq => "faq",
        }
    }

    /// Backing directory, relative to the content root
    pub fn directory(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog",
            ContentType::Comparison => "comparison",
            ContentType::Faq => "faq",
        }
    }

    /// First URL path segment for item pages
    pub fn route(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog",
            ContentType::Comparison => "compare",
            ContentType::Faq => "faq",
        }
    }

    /// Human name used in page titles
    pub fn noun(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "Post",
            ContentType::Comparison => "Comparison",
            ContentType::Faq => "FAQ",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A markdown-backed content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// File name without extension
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Category label; front-matter may override the requested type
    #[serde(rename = "type")]
    pub content_type: String,

    /// ISO-8601 timestamp
    pub date: String,

    /// Rendered HTML body
    pub content: String,

    #[serde(default)]
    pub target_keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Remaining scalar front-matter fields
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

impl ContentItem {
    /// Parsed `date`, if it is in a recognized format
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date_string(&self.date)
    }

    /// Date as shown to readers, e.g. "January 15, 2024"
    pub fn display_date(&self) -> String {
        match self.published_at() {
            Some(dt) => dt.format("%B %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }

    /// Ordering for listings: most recent first.
    /// Unparseable dates sort after all parseable ones, compared as text.
    pub fn newest_first(a: &ContentItem, b: &ContentItem) -> Ordering {
        match (a.published_at(), b.published_at()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.date.cmp(&a.date),
        }
    }
}

/// Current time in the same shape JavaScript's `toISOString` produces
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a date string in various formats. Values without an offset are UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str, date: &str) -> ContentItem {
        ContentItem {
            slug: slug.to_string(),
            title: String::new(),
            description: String::new(),
            content_type: "blog-post".to_string(),
            date: date.to_string(),
            content: String::new(),
            target_keywords: Vec::new(),
            idea_name: None,
            status: None,
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_content_type_labels() {
        for kind in ContentType::ALL {
            assert_eq!(ContentType::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ContentType::from_label("press-release"), None);
        assert_eq!(ContentType::from_label("Blog-Post"), None);
        assert_eq!(ContentType::Comparison.route(), "compare");
        assert_eq!(ContentType::BlogPost.directory(), "blog");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = "2024-01-15T10:30:00Z";
        for s in [
            "2024-01-15T10:30:00.000Z",
            "2024-01-15T10:30:00Z",
            "2024-01-15T12:30:00+02:00",
            "2024-01-15 10:30:00",
            "2024/01/15 10:30",
        ] {
            let dt = parse_date_string(s).unwrap_or_else(|| panic!("failed to parse {s}"));
            assert_eq!(dt.to_rfc3339_opts(SecondsFormat::Secs, true), expected, "{s}");
        }
        assert!(parse_date_string("2024-01-15").is_some());
        assert!(parse_date_string("next tuesday").is_none());
    }

    #[test]
    fn test_now_is_parseable() {
        let now = now_iso8601();
        assert!(now.ends_with('Z'));
        assert!(parse_date_string(&now).is_some());
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut items = vec![
            item("old", "2023-05-01"),
            item("undated", "someday"),
            item("new", "2024-02-01T08:00:00.000Z"),
            item("mid", "2023-11-20 09:00:00"),
        ];
        items.sort_by(ContentItem::newest_first);
        let slugs: Vec<&str> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_display_date() {
        assert_eq!(item("a", "2024-01-05").display_date(), "January 5, 2024");
        assert_eq!(item("a", "soon").display_date(), "soon");
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut it = item("a", "2024-01-05");
        it.target_keywords = vec!["k".to_string()];
        it.idea_name = Some("idea".to_string());
        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["type"], "blog-post");
        assert_eq!(json["targetKeywords"][0], "k");
        assert_eq!(json["ideaName"], "idea");
        assert!(json.get("status").is_none());
        assert!(json.get("extra").is_none());
    }
}
