/* src/server/adapter/axum/src/handler/mod.rs */

mod data;
mod order;
mod page;
mod reload;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use axum::routing::get;
use storefront_server::page::{ACTIVE_ORDER_PATH, LIVE_RELOAD_PATH};
use storefront_server::{
  CommerceBackend, ForwardedHeaders, Outlet, RequestContext, SessionCookie, ShellConfig,
  StorefrontError, StorefrontParts,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::LiveReload;

pub(crate) const ROOT_DATA_PATH: &str = "/_storefront/data/root";

pub(crate) struct AppState {
  pub backend: Arc<dyn CommerceBackend>,
  pub outlet: Arc<dyn Outlet>,
  pub shell: ShellConfig,
  pub session: SessionCookie,
}

impl AppState {
  /// Recover the per-request backend context from the request line and cookies.
  pub(crate) fn request_context(&self, uri: &Uri, headers: &HeaderMap) -> RequestContext {
    let auth_token = headers
      .get_all(axum::http::header::COOKIE)
      .iter()
      .filter_map(|v| v.to_str().ok())
      .find_map(|cookie| self.session.token_from_header(cookie));
    RequestContext::new(uri.path(), auth_token)
  }
}

/// Append upstream headers to a response header map. Values are appended,
/// never replaced, so repeated `Set-Cookie` entries all reach the client.
pub(crate) fn append_forwarded(
  target: &mut HeaderMap,
  forwarded: &ForwardedHeaders,
) -> Result<(), StorefrontError> {
  for (name, value) in forwarded.iter() {
    let name = HeaderName::from_bytes(name.as_bytes())
      .map_err(|e| StorefrontError::internal(format!("invalid forwarded header name '{name}': {e}")))?;
    let value = HeaderValue::from_str(value)
      .map_err(|e| StorefrontError::internal(format!("invalid value for header '{name}': {e}")))?;
    target.append(name, value);
  }
  Ok(())
}

pub(crate) fn build_router(parts: StorefrontParts, reload: Option<LiveReload>) -> Router {
  let development = parts.is_development();
  let public_dir = parts.public_dir.clone();

  let state = Arc::new(AppState {
    backend: parts.backend,
    outlet: parts.outlet,
    shell: parts.shell,
    session: parts.session,
  });

  let mut router = Router::new()
    .route(ROOT_DATA_PATH, get(data::handle_root_data))
    .route(ACTIVE_ORDER_PATH, get(order::handle_get_order).post(order::handle_order_action))
    // Every other path renders the root shell around the outlet.
    .fallback(page::handle_page)
    .with_state(state);

  // The reload socket exists only in development builds.
  if development {
    let reload = reload.unwrap_or_default();
    router = router.merge(
      Router::new().route(LIVE_RELOAD_PATH, get(reload::handle_live_reload)).with_state(reload),
    );
  }

  if let Some(dir) = public_dir {
    router = router
      .nest_service("/styles", ServeDir::new(dir.join("styles")))
      .nest_service("/assets", ServeDir::new(dir.join("assets")))
      .route_service("/favicon.ico", ServeFile::new(dir.join("favicon.ico")));
  }

  router
}
