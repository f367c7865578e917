use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rasoi_config::{SiteConfig, registry};
use rasoi_index::{DirSource, HttpSource, RecipeIndex};

mod commands;
mod validate;

#[derive(Parser)]
#[command(name = "rasoi-app", about = "Browse and validate the cookbook recipe catalog")]
struct Cli {
    /// Read recipes from a local site checkout instead of over HTTP
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Base URL of the deployed site (defaults to RASOI_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List loaded recipes
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one recipe in full
    Show { id: String },
    /// Search titles, descriptions and ingredients
    Search { query: String },
    /// List featured recipes
    Featured,
    /// List categories with recipe counts
    Categories,
    /// Validate a local recipe tree against the registry
    Validate { root: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // validate works on raw files and never goes through the index
    if let Command::Validate { root } = &cli.command {
        return validate::run(root);
    }

    let mut config = SiteConfig::new();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    let index = match &cli.root {
        Some(root) => RecipeIndex::new(DirSource::new(root), registry()),
        None => RecipeIndex::new(HttpSource::from_config(&config)?, registry()),
    };

    commands::run(&cli.command, &index).await
}
