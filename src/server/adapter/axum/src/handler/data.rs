/* src/server/adapter/axum/src/handler/data.rs */

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use storefront_server::revalidate::{HOME_PATH, url_path};
use storefront_server::{NavigationTransition, load_root};
use tracing::debug;

use super::{AppState, append_forwarded};
use crate::error::AxumError;

pub(crate) const REVALIDATE_HEADER: HeaderName = HeaderName::from_static("x-storefront-revalidate");

#[derive(serde::Deserialize)]
pub(super) struct RootDataQuery {
  prev: Option<String>,
  next: Option<String>,
}

/// Root loader data for client-side navigation.
///
/// With a `prev` URL the revalidation policy decides: no reload answers
/// `204` and the client keeps its previous load. Without `prev` (first load)
/// the loader always runs.
pub(super) async fn handle_root_data(
  State(state): State<Arc<AppState>>,
  Query(query): Query<RootDataQuery>,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Response, AxumError> {
  let next = query.next.unwrap_or_else(|| HOME_PATH.to_string());

  if let Some(prev) = query.prev {
    let transition = NavigationTransition::new(prev, next.clone());
    let reload = transition.should_revalidate();
    debug!(prev = transition.prev_path(), next = transition.next_path(), reload, "root revalidation");
    if !reload {
      return Ok(
        (StatusCode::NO_CONTENT, [(REVALIDATE_HEADER, HeaderValue::from_static("0"))])
          .into_response(),
      );
    }
  }

  let mut ctx = state.request_context(&uri, &headers);
  ctx.path = url_path(&next).to_string();
  let data = load_root(state.backend.as_ref(), &ctx).await?;

  let mut response_headers = HeaderMap::new();
  append_forwarded(&mut response_headers, data.forwarded_headers())?;
  response_headers.insert(REVALIDATE_HEADER, HeaderValue::from_static("1"));

  Ok((response_headers, axum::Json(data)).into_response())
}
