//! Create a new content item

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::item::now_iso8601;
use crate::content::ContentType;
use crate::Site;

#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    content_type: &'a str,
    date: String,
    #[serde(rename = "targetKeywords")]
    target_keywords: Vec<String>,
}

/// Write a markdown file with front matter into the type's directory
pub fn run(site: &Site, kind: ContentType, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    let target_dir = site.content_dir.join(kind.directory());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = serde_yaml::to_string(&Scaffold {
        title,
        description: "",
        content_type: kind.label(),
        date: now_iso8601(),
        target_keywords: Vec::new(),
    })?;
    let content = format!("---\n{}---\n\n", front_matter);

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(file_path)
}
