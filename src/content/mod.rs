//! Content module - markdown files with front-matter, rendered to HTML items

mod assembler;
mod error;
mod frontmatter;
pub mod item;
pub mod loader;
mod markdown;
pub mod repository;

pub use assembler::assemble;
pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use item::{ContentItem, ContentType};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use repository::{ContentRepository, FsRepository, MemoryRepository};
