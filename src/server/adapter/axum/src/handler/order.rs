/* src/server/adapter/axum/src/handler/order.rs */

use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use storefront_server::{ActiveOrder, ActiveOrderHandle, StorefrontError};

use super::{AppState, append_forwarded};
use crate::error::AxumError;

/// Cart mutation posted by the tray, either as JSON or as an HTML form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderActionInput {
  action: String,
  order_line_id: String,
  #[serde(default)]
  quantity: Option<u32>,
}

/// Where to send a form post back to. Only same-origin targets are
/// honoured: a relative path, or an absolute URL whose authority matches the
/// request's `Host`. Anything else lands on `/`.
fn redirect_target(referer: Option<&HeaderValue>, host: Option<&HeaderValue>) -> HeaderValue {
  let fallback = HeaderValue::from_static("/");
  let Some(uri) = referer.and_then(|v| v.to_str().ok()).and_then(|v| v.parse::<Uri>().ok()) else {
    return fallback;
  };
  if let Some(authority) = uri.authority() {
    let same_host = host
      .and_then(|h| h.to_str().ok())
      .is_some_and(|h| h.eq_ignore_ascii_case(authority.as_str()));
    if !same_host {
      return fallback;
    }
  }
  let target = uri.path_and_query().map_or("/", |pq| pq.as_str());
  if !target.starts_with('/') || target.starts_with("//") || target.starts_with("/\\") {
    return fallback;
  }
  HeaderValue::from_str(target).unwrap_or(fallback)
}

fn order_response(
  order: Option<ActiveOrder>,
  handle: &ActiveOrderHandle,
) -> Result<Response, AxumError> {
  let mut headers = HeaderMap::new();
  append_forwarded(&mut headers, &handle.take_headers())?;
  Ok((headers, axum::Json(serde_json::json!({ "activeOrder": order }))).into_response())
}

pub(super) async fn handle_get_order(
  State(state): State<Arc<AppState>>,
  req: Request,
) -> Result<Response, AxumError> {
  let ctx = state.request_context(req.uri(), req.headers());
  let handle = ActiveOrderHandle::new(state.backend.clone(), ctx);
  let order = handle.refresh().await?;
  order_response(order, &handle)
}

/// Apply `adjustItem` or `removeItem`. JSON callers get the updated order;
/// form posts are redirected back to the page they came from.
pub(super) async fn handle_order_action(
  State(state): State<Arc<AppState>>,
  req: Request,
) -> Result<Response, AxumError> {
  let ctx = state.request_context(req.uri(), req.headers());
  let is_json = req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| v.starts_with("application/json"));
  let location = redirect_target(req.headers().get(header::REFERER), req.headers().get(header::HOST));

  let input: OrderActionInput = if is_json {
    let axum::Json(input) = axum::Json::<OrderActionInput>::from_request(req, &state)
      .await
      .map_err(|e| StorefrontError::validation(e.body_text()))?;
    input
  } else {
    let axum::Form(input) = axum::Form::<OrderActionInput>::from_request(req, &state)
      .await
      .map_err(|e| StorefrontError::validation(e.body_text()))?;
    input
  };

  let handle = ActiveOrderHandle::new(state.backend.clone(), ctx);
  let order = match input.action.as_str() {
    "adjustItem" => {
      let quantity = input
        .quantity
        .ok_or_else(|| StorefrontError::validation("adjustItem requires a quantity"))?;
      handle.adjust_order_line(&input.order_line_id, quantity).await?
    }
    "removeItem" => handle.remove_item(&input.order_line_id).await?,
    other => return Err(StorefrontError::validation(format!("Unknown order action '{other}'")).into()),
  };

  if is_json {
    return order_response(order, &handle);
  }

  let mut headers = HeaderMap::new();
  append_forwarded(&mut headers, &handle.take_headers())?;
  headers.insert(header::LOCATION, location);
  Ok((StatusCode::SEE_OTHER, headers).into_response())
}
