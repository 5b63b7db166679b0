//! CLI entry point for blogpipe

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogpipe")]
#[command(version)]
#[command(about = "Build-time markdown content pipeline", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Category to create it in (defaults to the first configured one)
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Filename (without .md) for the new article
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Load every route and write render payloads
    #[command(alias = "b")]
    Build {
        /// Write the pages that loaded even if others failed
        #[arg(short, long)]
        keep_going: bool,

        /// Rebuild when content or configuration changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List the routes of a category
    Routes {
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Print the route table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the render payload of one route
    Show {
        slug: String,

        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Validate content without writing anything
    Check {
        /// Treat non-canonical slugs as errors
        #[arg(long)]
        strict: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogpipe=debug,info"
    } else {
        "blogpipe=info"
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
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            blogpipe::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            path,
        } => {
            let site = blogpipe::Site::new(&base_dir)?;
            blogpipe::commands::new::run(&site, &title, category.as_deref(), path.as_deref())?;
        }

        Commands::Build { keep_going, watch } => {
            let site = blogpipe::Site::new(&base_dir)?;
            tracing::info!("Building {} categories...", site.config.categories.len());

            let result = site.build(keep_going);
            if watch {
                if let Err(e) = &result {
                    tracing::error!("Build failed: {}", e);
                }
                blogpipe::commands::build::watch(&site, keep_going)?;
            } else {
                result?;
                println!("Built successfully!");
            }
        }

        Commands::Routes { category, json } => {
            let site = blogpipe::Site::new(&base_dir)?;
            blogpipe::commands::routes::run(&site, category.as_deref(), json)?;
        }

        Commands::Show { slug, category } => {
            let site = blogpipe::Site::new(&base_dir)?;
            blogpipe::commands::show::run(&site, &slug, category.as_deref())?;
        }

        Commands::Check { strict } => {
            let site = blogpipe::Site::new(&base_dir)?;
            blogpipe::commands::check::run(&site, strict)?;
        }

        Commands::Clean => {
            let site = blogpipe::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blogpipe version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
