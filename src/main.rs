//! CLI entry point for the SecondLook site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secondlook_site::content::ContentType;
use secondlook_site::Site;

#[derive(Parser)]
#[command(name = "secondlook")]
#[command(version)]
#[command(about = "Serve or pre-render the SecondLook marketing site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Create a new content item
    New {
        /// Content type (blog-post, comparison, faq)
        r#type: String,

        /// Title of the new item
        title: String,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List content items, newest first
    List {
        /// Content type (blog-post, comparison, faq, all)
        r#type: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "secondlook_site=debug,tower_http=debug,info"
    } else {
        "secondlook_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip, open } => {
            let site = Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!(
                "Starting server at http://{}:{} (signup store: {:?})",
                ip,
                port,
                site.config.signup.store
            );
            secondlook_site::server::start(&site, &ip, port, open).await?;
        }

        Commands::Generate => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate().await?;
            println!("Generated successfully!");
        }

        Commands::New {
            r#type,
            title,
            slug,
        } => {
            let site = Site::new(&base_dir)?;
            let kind = ContentType::from_label(&r#type).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown type: {}. Available: blog-post, comparison, faq",
                    r#type
                )
            })?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            site.new_item(kind, &title, slug.as_deref())?;
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            secondlook_site::commands::list::run(&site, r#type.as_deref()).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("secondlook version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
