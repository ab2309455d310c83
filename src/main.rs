//! Pacific Panama Fishing Site - Main Entry Point
//!
//! Loads a page headlessly, optionally replays an event script against it,
//! and prints the resulting page state as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use pacific_panama_site::Site;
use pacific_panama_site::app::script::{Pacing, load_script, replay};
use pacific_panama_site::domain::config::SiteConfig;
use pacific_panama_site::helpers::default_config_path;
use pacific_panama_site::i18n::Catalog;
use pacific_panama_site::services::{FileStore, block_on};

#[derive(Debug, Parser)]
#[command(name = "pacific-panama", version, about)]
struct Args {
    /// JSON event script to replay
    #[arg(long)]
    script: Option<PathBuf>,

    /// Site configuration (TOML); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Location path the page is loaded at
    #[arg(long, default_value = "/index.html")]
    path: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Directory for the persistent local store; defaults to the user data directory
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Sleep for real during `wait` steps
    #[arg(long)]
    realtime: bool,

    /// Run pending timers to completion after the script
    #[arg(long)]
    settle: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Starting Pacific Panama site engine...");

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = SiteConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let local_store = match args.storage_dir {
        Some(dir) => FileStore::open(dir.join("local-storage.json")),
        None => FileStore::open_default()?,
    };

    let catalog = Arc::new(Catalog::bundled().context("loading translation catalog")?);

    let mut site = Site::builder()
        .config(config)
        .catalog(catalog)
        .local_store(local_store)
        .path(args.path)
        .viewport_width(args.width)
        .build()?;

    if let Some(script) = &args.script {
        let steps = load_script(script)
            .with_context(|| format!("loading script {}", script.display()))?;
        let pacing = if args.realtime {
            Pacing::RealTime
        } else {
            Pacing::Virtual
        };
        block_on(replay(&mut site, &steps, pacing));
    }

    if args.settle {
        site.run_until_idle();
    }

    println!("{}", serde_json::to_string_pretty(&site.summary())?);
    Ok(())
}
