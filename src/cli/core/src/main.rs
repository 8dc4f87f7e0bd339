/* src/cli/core/src/main.rs */

mod check;
mod config;
mod serve;
mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storefront_server::BuildMode;
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;

#[derive(Parser)]
#[command(name = "storefront", about = "Storefront root shell server", version)]
struct Cli {
  /// Path to storefront.toml (searched upward from the current directory when omitted)
  #[arg(long, global = true)]
  config: Option<PathBuf>,
  /// Override the listening port
  #[arg(long, global = true)]
  port: Option<u16>,
  /// Build mode: development or production
  #[arg(long, global = true)]
  mode: Option<BuildMode>,
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Start the HTTP server (default)
  Serve,
  /// Validate the config and load root data from the shop API once
  Check {
    /// Request path to load root data for
    #[arg(long, default_value = "/")]
    path: String,
  },
}

fn resolve_config(cli: &Cli) -> Result<StorefrontConfig> {
  let path = match cli.config {
    Some(ref path) => path.clone(),
    None => {
      let cwd = std::env::current_dir().context("failed to get current directory")?;
      config::find_config(&cwd)?
    }
  };
  let mut config = config::load_config(&path)?;
  config::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
  if let Some(port) = cli.port {
    config.server.port = port;
  }
  if let Some(mode) = cli.mode {
    config.app.mode = Some(mode);
  }
  config.validate().with_context(|| format!("invalid config in {}", path.display()))?;
  Ok(config)
}

fn init_tracing(level: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = resolve_config(&cli)?;
  init_tracing(&config.app.log_level);

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve::run_serve(&config).await,
    Command::Check { path } => check::run_check(&config, &path).await,
  }
}
