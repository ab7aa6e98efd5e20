//! Built-in page templates using Tera template engine
//!
//! Templates are embedded in the binary, so a deployed site needs only its
//! content directory and config.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentType};
use crate::helpers::{html_escape, item_path};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Content HTML and pre-built head tags are inserted as-is;
        // user text goes through the escape_html filter instead.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("item.html", include_str!("site/item.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("escape_html", escape_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape HTML special characters (leaves `/` alone, unlike `escape`)
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    pub blog_heading: String,
    pub blog_description: String,
    pub year: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            url: config.base_url().to_string(),
            blog_heading: config.blog.heading.clone(),
            blog_description: config.blog.description.clone(),
            year: chrono::Utc::now().format("%Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemData {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub display_date: String,
    pub content: String,
    pub path: String,
}

impl ItemData {
    pub fn new(kind: ContentType, item: &ContentItem) -> Self {
        Self {
            slug: item.slug.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            date: item.date.clone(),
            display_date: item.display_date(),
            content: item.content.clone(),
            path: item_path(kind, &item.slug),
        }
    }
}
