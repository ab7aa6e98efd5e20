//! SEO output derived from content items: `<head>` metadata and JSON-LD

mod metadata;
pub mod structured_data;

pub use metadata::{OpenGraph, PageMetadata, TwitterCard};
pub use structured_data::{extract_qa_pairs, json_ld_script, QaPair};
