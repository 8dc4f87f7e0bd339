/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use storefront_server::{
  ActiveOrderHandle, CartTray, Header, InteractionContext, StorefrontError, load_root,
  render_root_page,
};
use tracing::debug;

use super::{AppState, append_forwarded};
use crate::error::AxumError;

/// `?cart=open|closed`, submitted by the header and tray forms.
#[derive(Deserialize)]
struct CartQuery {
  cart: Option<String>,
}

/// Apply a requested tray state to a freshly mounted context. Unknown values
/// and malformed queries leave the tray closed.
fn apply_cart_query(uri: &Uri, ctx: &mut InteractionContext) {
  let requested = Query::<CartQuery>::try_from_uri(uri).ok().and_then(|Query(q)| q.cart);
  match requested.as_deref() {
    Some("open") if !ctx.is_tray_open() => Header::on_cart_icon_click(ctx),
    Some("closed") => CartTray::on_close(ctx),
    _ => {}
  }
}

/// Render the root shell for any GET that no other route claimed.
///
/// Root data and the cart's active order are fetched together. A loader
/// failure fails the page; an order failure only leaves the cart empty.
pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  method: Method,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Response, AxumError> {
  if method != Method::GET && method != Method::HEAD {
    return Err(StorefrontError::not_found(format!("No route for {method} {}", uri.path())).into());
  }

  let ctx = state.request_context(&uri, &headers);
  let order = Arc::new(ActiveOrderHandle::new(state.backend.clone(), ctx.clone()));

  let (data, order_result) = tokio::join!(load_root(state.backend.as_ref(), &ctx), order.refresh());
  let data = data?;
  if order_result.is_err() {
    debug!(path = %ctx.path, "rendering with empty cart");
  }

  let mut interaction = InteractionContext::new(order.clone());
  apply_cart_query(&uri, &mut interaction);
  let content = state.outlet.render(&ctx.path, &data, &interaction);
  let html = render_root_page(&state.shell, &data, &interaction, &content)?;

  let mut response_headers = HeaderMap::new();
  append_forwarded(&mut response_headers, data.forwarded_headers())?;
  append_forwarded(&mut response_headers, &order.take_headers())?;

  Ok((response_headers, Html(html)).into_response())
}
