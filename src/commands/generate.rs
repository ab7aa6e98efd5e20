//! Generate static files

use anyhow::Result;

use crate::generator::{GenerateStats, Generator};
use crate::Site;

/// Pre-render the whole site into the public directory
pub async fn run(site: &Site) -> Result<GenerateStats> {
    let start = std::time::Instant::now();

    let generator = Generator::new(
        site.pages()?,
        site.public_dir.clone(),
        site.static_dir.clone(),
    );
    let stats = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages and copied {} assets in {:.2}s",
        stats.pages,
        stats.assets,
        duration.as_secs_f64()
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_from_disk() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        for kind in ["blog", "comparison", "faq"] {
            fs::create_dir_all(site.content_dir.join(kind)).unwrap();
        }
        fs::write(
            site.content_dir.join("faq/getting-started.md"),
            "---\ntitle: Getting Started\n---\n## How do I start?\n\nSign up.\n",
        )
        .unwrap();

        let stats = run(&site).await.unwrap();
        assert_eq!(stats.pages, 4);

        let faq = fs::read_to_string(site.public_dir.join("faq/getting-started/index.html")).unwrap();
        assert!(faq.contains(r#""name":"How do I start?""#));
    }
}
