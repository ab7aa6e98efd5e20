//! Generator module - pre-renders every page into the public directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::ContentType;
use crate::pages::Pages;

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateStats {
    pub pages: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    pages: Pages,
    public_dir: PathBuf,
    static_dir: PathBuf,
}

impl Generator {
    /// Create a new generator
    pub fn new(pages: Pages, public_dir: PathBuf, static_dir: PathBuf) -> Self {
        Self {
            pages,
            public_dir,
            static_dir,
        }
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateStats> {
        let mut stats = GenerateStats::default();

        fs::create_dir_all(&self.public_dir)?;

        self.write_page("index.html", &self.pages.home().await?)?;
        self.write_page("blog/index.html", &self.pages.blog_index().await?)?;
        self.write_page("404.html", &self.pages.not_found(None)?)?;
        stats.pages += 3;

        for kind in ContentType::ALL {
            let items = self.pages.loader().list(kind).await;
            tracing::debug!("Rendering {} {} items", items.len(), kind);

            for item in &items {
                let html = self.pages.item_page(kind, item)?;
                let relative = format!("{}/{}/index.html", kind.route(), item.slug);
                self.write_page(&relative, &html)?;
                stats.pages += 1;
            }
        }

        stats.assets = self.copy_static_assets()?;

        Ok(stats)
    }

    fn write_page(&self, relative: &str, html: &str) -> Result<()> {
        let output_path = self.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory verbatim, returning the number of files
    fn copy_static_assets(&self) -> Result<usize> {
        copy_tree(&self.static_dir, &self.public_dir)
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(from)?;
        let dest = to.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}
