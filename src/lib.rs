//! secondlook-site: the SecondLook marketing site
//!
//! Markdown content (blog posts, comparisons, FAQs) is rendered into
//! templated pages with SEO metadata and structured data, served over HTTP
//! or pre-rendered to static files. Email signups are appended to a store.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod seo;
pub mod server;
pub mod signup;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
}

impl Site {
    /// Load `_config.yml` from a directory (defaults when absent), then apply environment overrides
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        }
    }

    /// Content loader over the content directory
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::from_dir(&self.content_dir)
    }

    /// Page renderer
    pub fn pages(&self) -> Result<pages::Pages> {
        pages::Pages::new(self.config.clone(), self.loader())
    }

    /// Signup recorder backed by the configured store
    pub fn recorder(&self) -> Result<signup::SignupRecorder> {
        let store = signup::from_config(&self.config.signup, &self.base_dir)?;
        Ok(signup::SignupRecorder::new(store, self.config.site_id.clone()))
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<generator::GenerateStats> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new content item
    pub fn new_item(&self, kind: content::ContentType, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::run(self, kind, title, slug)
    }
}
