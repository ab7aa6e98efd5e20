//! Backing stores for content files
//!
//! A repository only knows how to enumerate slugs and hand back raw text.
//! Parsing and rendering live in the assembler, so a store can be swapped
//! (file system, in-memory fixtures) without touching either.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, ContentType};

/// Directory-as-database access to raw content
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Slugs of every item of a type, in enumeration order
    async fn list_ids(&self, kind: ContentType) -> Result<Vec<String>, ContentError>;

    /// Raw file text (front-matter and body) of one item
    async fn read_raw(&self, kind: ContentType, slug: &str) -> Result<String, ContentError>;
}

/// Reads `<root>/<type directory>/<slug>.md`
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding items of a type
    pub fn type_dir(&self, kind: ContentType) -> PathBuf {
        self.root.join(kind.directory())
    }

    /// Path an item of this slug lives at
    pub fn item_path(&self, kind: ContentType, slug: &str) -> PathBuf {
        self.type_dir(kind).join(format!("{}.md", slug))
    }
}

#[async_trait]
impl ContentRepository for FsRepository {
    async fn list_ids(&self, kind: ContentType) -> Result<Vec<String>, ContentError> {
        let dir = self.type_dir(kind);

        tokio::task::spawn_blocking(move || {
            if !dir.is_dir() {
                return Err(ContentError::MissingDirectory(dir));
            }

            let mut slugs = Vec::new();
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name()
            {
                let entry = entry.map_err(|e| ContentError::Io(e.into()))?;
                let path = entry.path();
                if path.is_file() && is_markdown_file(path) {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        slugs.push(stem.to_string());
                    }
                }
            }

            tracing::debug!("Found {} {} files in {:?}", slugs.len(), kind, dir);
            Ok(slugs)
        })
        .await
        .map_err(|e| ContentError::Io(std::io::Error::other(e)))?
    }

    async fn read_raw(&self, kind: ContentType, slug: &str) -> Result<String, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        let path = self.item_path(kind, slug);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ContentError::MissingFile(path)),
            Err(e) => Err(ContentError::Io(e)),
        }
    }
}

/// Fixed in-process content, keyed by type then slug
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    items: HashMap<ContentType, BTreeMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an item's raw text
    pub fn insert(&mut self, kind: ContentType, slug: &str, raw: &str) {
        self.items
            .entry(kind)
            .or_default()
            .insert(slug.to_string(), raw.to_string());
    }

    pub fn with(mut self, kind: ContentType, slug: &str, raw: &str) -> Self {
        self.insert(kind, slug, raw);
        self
    }
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn list_ids(&self, kind: ContentType) -> Result<Vec<String>, ContentError> {
        Ok(self
            .items
            .get(&kind)
            .map(|items| items.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn read_raw(&self, kind: ContentType, slug: &str) -> Result<String, ContentError> {
        self.items
            .get(&kind)
            .and_then(|items| items.get(slug))
            .cloned()
            .ok_or_else(|| ContentError::MissingItem {
                content_type: kind.label().to_string(),
                slug: slug.to_string(),
            })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// Slugs are single path segments
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}
