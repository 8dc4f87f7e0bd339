/* src/cli/core/src/check.rs */

use anyhow::{Context, Result};
use storefront_server::{RequestContext, load_root};
use tracing::info;

use crate::config::StorefrontConfig;
use crate::serve::graphql_backend;

/// Load root data once as an anonymous visitor to prove the shop API is reachable.
pub async fn run_check(config: &StorefrontConfig, path: &str) -> Result<()> {
  let backend = graphql_backend(config);
  let ctx = RequestContext::anonymous(path);
  let data = load_root(&backend, &ctx)
    .await
    .with_context(|| format!("root data load from {} failed", config.api.url))?;
  info!(
    channel = %data.active_channel.code,
    collections = data.collections.len(),
    "shop API reachable"
  );
  Ok(())
}
