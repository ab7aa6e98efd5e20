use std::path::PathBuf;

/// Why a content item could not be produced
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("content file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("no item {slug:?} of type {content_type}")]
    MissingItem { content_type: String, slug: String },

    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("front-matter error: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("markdown conversion failed: {0}")]
    Markdown(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Not-found conditions, as opposed to broken content
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::MissingDirectory(_)
                | ContentError::MissingFile(_)
                | ContentError::MissingItem { .. }
                | ContentError::InvalidSlug(_)
        )
    }
}
