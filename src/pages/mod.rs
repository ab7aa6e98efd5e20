//! Page composition: content items + metadata + structured data → HTML
//!
//! Shared by the live server and the static generator so both produce the
//! same markup.

use anyhow::Result;
use serde_json::Value;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentLoader, ContentType};
use crate::seo::{json_ld_script, structured_data, PageMetadata};
use crate::templates::{ItemData, SiteData, TemplateRenderer};

/// Number of posts teased on the home page
const HOME_POST_COUNT: usize = 3;

/// A rendered page and whether it represents real content
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    pub found: bool,
}

/// Renders every page type of the site
pub struct Pages {
    config: SiteConfig,
    loader: ContentLoader,
    templates: TemplateRenderer,
}

impl Pages {
    pub fn new(config: SiteConfig, loader: ContentLoader) -> Result<Self> {
        Ok(Self {
            config,
            loader,
            templates: TemplateRenderer::new()?,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Landing page with signup form and latest posts
    pub async fn home(&self) -> Result<String> {
        let posts: Vec<ItemData> = self
            .loader
            .list(ContentType::BlogPost)
            .await
            .iter()
            .take(HOME_POST_COUNT)
            .map(|p| ItemData::new(ContentType::BlogPost, p))
            .collect();

        let page_schemas = structured_data::home_faq(&self.config).into_iter().collect();
        let mut context = self.base_context(&PageMetadata::home(&self.config), page_schemas);
        context.insert("posts", &posts);
        context.insert("faq", &self.config.home_faq);
        self.templates.render("home.html", &context)
    }

    /// All blog posts, newest first
    pub async fn blog_index(&self) -> Result<String> {
        let posts: Vec<ItemData> = self
            .loader
            .list(ContentType::BlogPost)
            .await
            .iter()
            .map(|p| ItemData::new(ContentType::BlogPost, p))
            .collect();

        let mut context = self.base_context(
            &PageMetadata::blog_index(&self.config),
            vec![structured_data::blog(&self.config)],
        );
        context.insert("posts", &posts);
        self.templates.render("blog_index.html", &context)
    }

    /// A blog post, comparison or FAQ page; a not-found page if absent
    pub async fn item(&self, kind: ContentType, slug: &str) -> Result<RenderedPage> {
        let Some(item) = self.loader.get(kind, slug).await else {
            return Ok(RenderedPage {
                html: self.not_found(Some(kind))?,
                found: false,
            });
        };

        Ok(RenderedPage {
            html: self.item_page(kind, &item)?,
            found: true,
        })
    }

    /// Render an already loaded item
    pub fn item_page(&self, kind: ContentType, item: &ContentItem) -> Result<String> {
        let mut context = self.base_context(
            &PageMetadata::for_item(&self.config, kind, item),
            vec![structured_data::for_item(&self.config, kind, item)],
        );
        context.insert("kind", kind.label());
        context.insert("item", &ItemData::new(kind, item));
        self.templates.render("item.html", &context)
    }

    /// Not-found page, titled after the kind of item that was missing
    pub fn not_found(&self, kind: Option<ContentType>) -> Result<String> {
        let metadata = match kind {
            Some(kind) => PageMetadata::not_found(&self.config, kind),
            None => PageMetadata {
                title: format!("Page Not Found | {}", self.config.title),
                description: None,
                keywords: None,
                canonical: None,
                open_graph: None,
                twitter: None,
            },
        };

        let (back_path, back_label) = match kind {
            Some(ContentType::BlogPost) => ("/blog", "Back to Blog".to_string()),
            _ => ("/", format!("Back to {}", self.config.title)),
        };

        let mut context = self.base_context(&metadata, Vec::new());
        context.insert(
            "heading",
            &format!("{} Not Found", kind.map(|k| k.noun()).unwrap_or("Page")),
        );
        context.insert("back_path", back_path);
        context.insert("back_label", &back_label);
        self.templates.render("not_found.html", &context)
    }

    /// Context every page starts from: site data, head tags and site-wide JSON-LD
    fn base_context(&self, metadata: &PageMetadata, page_schemas: Vec<Value>) -> Context {
        let mut schemas = vec![
            structured_data::organization(&self.config),
            structured_data::website(&self.config),
        ];
        schemas.extend(page_schemas);
        let json_ld: Vec<String> = schemas.iter().map(json_ld_script).collect();

        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context.insert("head", &metadata.to_html());
        context.insert("json_ld", &json_ld);
        context
    }
}
