use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use roster::app::App;
use roster::artwork::{ArtworkFetcher, ArtworkSource, DirectorySource, GeneratedSource, ImagePort};
use roster::catalog::Catalog;
use roster::config::Config;

/// Capacity of the artwork completion channel.
const ARTWORK_CHANNEL_SIZE: usize = 256;

/// Get the config directory path (~/.config/roster/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("roster"))
}

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Browse an artist catalog in the terminal")]
struct Args {
    /// Catalog JSON file (defaults to ~/.config/roster/catalog.json)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Config file (defaults to ~/.config/roster/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of artwork files, overrides `artwork_dir` from the config
    #[arg(long, value_name = "DIR")]
    artwork_dir: Option<PathBuf>,

    /// Start with extended rows
    #[arg(long)]
    extended: bool,

    /// Disable artwork loading entirely (text-only rows)
    #[arg(long)]
    no_artwork: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

fn init_tracing(log: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log.as_ref())?;

    let config_dir = get_config_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;
    if args.extended {
        config.extended = true;
    }
    if let Some(dir) = args.artwork_dir.clone() {
        config.artwork_dir = Some(dir);
    }

    let catalog_path = args
        .catalog
        .clone()
        .unwrap_or_else(|| config_dir.join("catalog.json"));
    let mut catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog '{}'", catalog_path.display()))?;
    if config.sort_by_name {
        catalog.sort_by_name();
    }

    let (artwork_tx, artwork_rx) = mpsc::channel(ARTWORK_CHANNEL_SIZE);
    let image_port: Option<Arc<dyn ImagePort>> = if args.no_artwork {
        tracing::info!("Artwork loading disabled");
        None
    } else {
        let mut sources: Vec<Arc<dyn ArtworkSource>> = Vec::new();
        if let Some(dir) = &config.artwork_dir {
            sources.push(Arc::new(DirectorySource::new(dir)));
        }
        sources.push(Arc::new(GeneratedSource));
        Some(Arc::new(ArtworkFetcher::new(
            sources,
            config.artwork_cache_size,
            artwork_tx,
        )))
    };

    let mut app = App::new(catalog, &config, image_port).with_catalog_path(catalog_path);
    roster::ui::run(&mut app, artwork_rx).await
}
