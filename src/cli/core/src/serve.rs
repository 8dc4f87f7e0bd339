/* src/cli/core/src/serve.rs */

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use storefront_graphql::{GraphqlBackend, GraphqlConfig};
use storefront_server::{SessionCookie, ShellConfig, Storefront};
use storefront_server_axum::{IntoAxumRouter, LiveReload};
use tracing::{info, warn};

use crate::config::StorefrontConfig;
use crate::watch;

pub(crate) fn graphql_backend(config: &StorefrontConfig) -> GraphqlBackend {
  let mut gql = GraphqlConfig::new(config.api.url.trim());
  gql.channel_token.clone_from(&config.api.channel_token);
  gql.auth_token_header.clone_from(&config.api.auth_token_header);
  gql.session = session_cookie(config);
  GraphqlBackend::new(gql)
}

fn session_cookie(config: &StorefrontConfig) -> SessionCookie {
  SessionCookie::new(config.server.session_cookie.as_str()).secure(config.server.secure_cookie)
}

pub(crate) fn build_storefront(config: &StorefrontConfig) -> Storefront {
  let mut shell = ShellConfig { mode: config.build_mode(), ..ShellConfig::default() };
  if let Some(ref title) = config.app.title {
    shell.title.clone_from(title);
  }
  Storefront::new(Arc::new(graphql_backend(config)))
    .shell(shell)
    .session_cookie(session_cookie(config))
    .public_dir(&config.server.public_dir)
}

pub async fn run_serve(config: &StorefrontConfig) -> Result<()> {
  let mode = config.build_mode();
  let storefront = build_storefront(config);
  let public_dir = Path::new(&config.server.public_dir);

  // The watcher must outlive the server; dropping it stops notifications
  let (router, _watcher) = if mode.is_development() {
    let reload = LiveReload::new();
    let watcher = if public_dir.is_dir() {
      info!(dir = %public_dir.display(), "watching public assets for live reload");
      Some(watch::watch_public_dir(public_dir, reload.clone())?)
    } else {
      warn!(dir = %public_dir.display(), "public dir not found, live reload will not fire");
      None
    };
    (storefront.into_axum_router_with_reload(reload), watcher)
  } else {
    (storefront.into_axum_router(), None)
  };

  let addr = config.bind_addr();
  let listener =
    tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("failed to bind {addr}"))?;
  let local_addr = listener.local_addr()?;
  info!(
    mode = mode.as_str(),
    api = %config.api.url,
    "storefront running on http://localhost:{}",
    local_addr.port()
  );

  axum::serve(listener, router)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;
  info!("storefront stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
}

#[cfg(test)]
mod tests {
  use storefront_server::BuildMode;

  use super::*;

  fn config(extra: &str) -> StorefrontConfig {
    toml::from_str(&format!("[api]\nurl = \"http://localhost:3000/shop-api\"\n{extra}")).unwrap()
  }

  #[test]
  fn storefront_carries_config_into_parts() {
    let cfg = config(
      "\n[server]\npublic_dir = \"/srv/public\"\nsession_cookie = \"sid\"\nsecure_cookie = true\n\n[app]\nmode = \"production\"\ntitle = \"Shop\"\n",
    );
    let parts = build_storefront(&cfg).into_parts();
    assert_eq!(parts.shell.mode, BuildMode::Production);
    assert!(!parts.is_development());
    assert_eq!(parts.shell.title, "Shop");
    assert_eq!(parts.session, SessionCookie::new("sid").secure(true));
    assert_eq!(parts.public_dir.as_deref(), Some(Path::new("/srv/public")));
  }

  #[test]
  fn default_title_is_kept_without_override() {
    let cfg = config("\n[app]\nmode = \"development\"\n");
    let parts = build_storefront(&cfg).into_parts();
    assert!(parts.is_development());
    assert_eq!(parts.shell.title, ShellConfig::default().title);
  }

  #[test]
  fn graphql_backend_uses_api_section() {
    let cfg = config("channel_token = \"eu\"\nauth_token_header = \"x-token\"\n");
    let backend = graphql_backend(&cfg);
    let gql = backend.config();
    assert_eq!(gql.api_url, "http://localhost:3000/shop-api");
    assert_eq!(gql.channel_token.as_deref(), Some("eu"));
    assert_eq!(gql.auth_token_header, "x-token");
    assert_eq!(gql.session.name(), "storefront_session");
  }
}
