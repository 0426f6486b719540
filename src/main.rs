mod app;
mod cart;
mod config;
mod event;
mod logging;
mod query;
mod shop;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "A terminal storefront: browse a remote product catalog and keep a local cart")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/storefront/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Product catalog endpoint
  #[arg(short, long)]
  url: Option<String>,

  /// Cart storage database file
  #[arg(short, long)]
  storage: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let _log_guard = logging::init(&config::data_dir()?)?;
  info!("storefront loaded");

  // Load configuration, then apply command line overrides
  let mut config = config::Config::load(args.config.as_deref())?;
  if let Some(url) = args.url {
    config.catalog.url = url;
  }
  if let Some(path) = args.storage {
    config.storage.path = Some(path);
  }

  let mut app = app::App::new(&config)?;
  app.run().await?;

  Ok(())
}
