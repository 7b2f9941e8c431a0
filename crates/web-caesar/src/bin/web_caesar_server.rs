//! Web Caesar REST Server
//!
//! Serves Caesar rotation and brute-force decryption over HTTP, plus the
//! built UI when a static directory is configured.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use web_caesar::config::{Config, CONFIG_ENV_VAR};
use web_caesar::server::startup::start_server;

#[derive(Parser)]
#[command(name = "web_caesar_server")]
#[command(about = "Web Caesar REST API Server")]
#[command(version)]
struct Args {
  /// JSON config file
  #[arg(long, env = CONFIG_ENV_VAR)]
  config: Option<PathBuf>,

  /// Server bind address, overrides the config file
  #[arg(long)]
  bind: Option<SocketAddr>,

  /// Directory of built UI assets to serve
  #[arg(long)]
  static_dir: Option<PathBuf>,

  /// Directory of `<code>.txt` word lists replacing the built-in dictionaries
  #[arg(long)]
  dictionaries: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("debug,hyper=info,tower_http=debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("web_caesar=info,caesar=warn,warn"))
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let mut config = match &args.config {
    Some(path) => Config::load_from_file(path)?,
    None => Config::load()?,
  };
  if let Some(bind) = args.bind {
    config.bind = bind;
  }
  if let Some(dir) = args.static_dir {
    config.static_dir = Some(dir);
  }
  if let Some(dir) = args.dictionaries {
    config.dictionaries_dir = Some(dir);
  }
  config.validate()?;

  scribe::info!("Starting Web Caesar REST Server v{}", env!("CARGO_PKG_VERSION"));
  scribe::info!("Binding to address: {}", config.bind);

  start_server(config).await?;

  Ok(())
}
