/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::StorefrontConfig;

pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Walk upward from `start` to find `storefront.toml`, like Cargo.toml discovery
pub fn find_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE_NAME} not found (searched upward from {})", start.display());
    }
  }
}

/// Read and parse a config file. Validation runs after env overrides, so it
/// is left to the caller.
pub fn load_config(path: &Path) -> Result<StorefrontConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut config: StorefrontConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;

  // Relative public_dir resolves against the config file, not the cwd
  let public_dir = Path::new(&config.server.public_dir);
  if public_dir.is_relative()
    && let Some(base) = path.parent()
  {
    config.server.public_dir = base.join(public_dir).to_string_lossy().into_owned();
  }
  Ok(config)
}

/// Apply `PORT`, `STOREFRONT_API_URL` and `STOREFRONT_ENV` on top of the file.
/// `env` is a lookup so tests need not touch the process environment.
pub fn apply_env_overrides(
  config: &mut StorefrontConfig,
  env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
  if let Some(port) = env("PORT") {
    config.server.port =
      port.trim().parse().with_context(|| format!("PORT must be a port number, got \"{port}\""))?;
  }
  if let Some(url) = env("STOREFRONT_API_URL") {
    config.api.url = url;
  }
  if let Some(mode) = env("STOREFRONT_ENV") {
    config.app.mode = Some(mode.parse().map_err(anyhow::Error::msg)?);
  }
  Ok(())
}
