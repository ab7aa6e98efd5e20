//! Content loader - the list/fetch surface used by pages
//!
//! Every call reads fresh from the repository. Failures never escape:
//! they are logged and the item is treated as absent.

use std::path::Path;
use std::sync::Arc;

use super::assembler::assemble;
use super::repository::{ContentRepository, FsRepository};
use super::{ContentError, ContentItem, ContentType, MarkdownRenderer};

/// Loads content items through a repository
#[derive(Clone)]
pub struct ContentLoader {
    repository: Arc<dyn ContentRepository>,
    renderer: Arc<MarkdownRenderer>,
}

impl ContentLoader {
    /// Create a loader over any repository
    pub fn new(repository: Arc<dyn ContentRepository>, renderer: Arc<MarkdownRenderer>) -> Self {
        Self {
            repository,
            renderer,
        }
    }

    /// Create a loader reading markdown files under `content_dir`
    pub fn from_dir<P: AsRef<Path>>(content_dir: P) -> Self {
        Self::new(
            Arc::new(FsRepository::new(content_dir)),
            Arc::new(MarkdownRenderer::new()),
        )
    }

    /// All items of a type label, newest first. Unknown labels give nothing.
    pub async fn list_all(&self, content_type: &str) -> Vec<ContentItem> {
        match ContentType::from_label(content_type) {
            Some(kind) => self.list(kind).await,
            None => {
                tracing::debug!("Unknown content type {:?}", content_type);
                Vec::new()
            }
        }
    }

    /// One item by type label and slug
    pub async fn get_one(&self, content_type: &str, slug: &str) -> Option<ContentItem> {
        let kind = ContentType::from_label(content_type)?;
        self.get(kind, slug).await
    }

    /// All items of a type, newest first
    pub async fn list(&self, kind: ContentType) -> Vec<ContentItem> {
        let slugs = match self.repository.list_ids(kind).await {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::warn!("Content directory for {} unavailable: {}", kind, e);
                return Vec::new();
            }
        };

        // Items are independent, so assemble them side by side
        let handles: Vec<_> = slugs
            .into_iter()
            .map(|slug| {
                let loader = self.clone();
                tokio::spawn(async move { loader.get(kind, &slug).await })
            })
            .collect();

        let mut items = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(e) => tracing::warn!("Content task for {} failed: {}", kind, e),
            }
        }

        // Stable: equal dates keep enumeration order
        items.sort_by(ContentItem::newest_first);
        items
    }

    /// One item, or `None` if it is missing or cannot be assembled
    pub async fn get(&self, kind: ContentType, slug: &str) -> Option<ContentItem> {
        match self.load(kind, slug).await {
            Ok(item) => Some(item),
            Err(e) if e.is_not_found() => {
                tracing::warn!("{} {:?} not found: {}", kind, slug, e);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load {} {:?}: {}", kind, slug, e);
                None
            }
        }
    }

    async fn load(&self, kind: ContentType, slug: &str) -> Result<ContentItem, ContentError> {
        let raw = self.repository.read_raw(kind, slug).await?;

        // Highlighting is CPU-bound; keep it off the async workers
        let renderer = Arc::clone(&self.renderer);
        let slug = slug.to_string();
        tokio::task::spawn_blocking(move || assemble(&renderer, kind, &slug, &raw))
            .await
            .map_err(|e| ContentError::Io(std::io::Error::other(e)))?
    }
}
