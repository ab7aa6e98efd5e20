//! List site content

use anyhow::Result;

use crate::content::{ContentItem, ContentType};
use crate::Site;

/// Print items of one type (or every type), newest first
pub async fn run(site: &Site, content_type: Option<&str>) -> Result<()> {
    let kinds = match content_type {
        None | Some("all") => ContentType::ALL.to_vec(),
        Some(label) => match ContentType::from_label(label) {
            Some(kind) => vec![kind],
            None => anyhow::bail!(
                "Unknown type: {}. Available: blog-post, comparison, faq",
                label
            ),
        },
    };

    let loader = site.loader();
    for kind in kinds {
        let items = loader.list(kind).await;
        println!("{} ({}):", kind, items.len());
        for item in &items {
            println!("  {}", format_line(item));
        }
    }

    Ok(())
}

fn format_line(item: &ContentItem) -> String {
    let date = item
        .published_at()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| item.date.clone());
    format!("{} - {} [{}]", date, item.title, item.slug)
}
