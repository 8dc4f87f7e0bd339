/* src/server/core/rust/src/loader.rs */

use futures_util::future::try_join3;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{CommerceBackend, RequestContext};
use crate::commerce::{ActiveCustomer, Channel, Collection, ForwardedHeaders};
use crate::errors::StorefrontError;

/// Root data for one navigation. Frozen once built; the next reloading
/// navigation replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLoadResult {
  pub active_customer: ActiveCustomer,
  pub active_channel: Channel,
  pub collections: Vec<Collection>,
}

impl PageLoadResult {
  /// Headers captured from "get active customer", to be set on the response
  /// whether or not a customer was found.
  pub fn forwarded_headers(&self) -> &ForwardedHeaders {
    &self.active_customer.headers
  }
}

/// Keep the direct children of the root collection, in backend order.
pub fn top_level_collections(collections: Vec<Collection>) -> Vec<Collection> {
  collections.into_iter().filter(Collection::is_top_level).collect()
}

/// Fetch collections, active customer and active channel concurrently and
/// assemble them. The first failure fails the whole load.
pub async fn load_root(
  backend: &dyn CommerceBackend,
  ctx: &RequestContext,
) -> Result<PageLoadResult, StorefrontError> {
  let (collections, active_customer, channel) = try_join3(
    backend.list_collections(ctx),
    backend.active_customer(ctx),
    backend.active_channel(ctx),
  )
  .await
  .inspect_err(|e| warn!(path = %ctx.path, error = %e, "root loader failed"))?;

  let active_channel = channel.ok_or_else(|| {
    warn!(path = %ctx.path, "backend resolved no active channel");
    StorefrontError::missing_channel()
  })?;

  let total = collections.len();
  let collections = top_level_collections(collections);
  debug!(
    path = %ctx.path,
    collections = collections.len(),
    filtered_out = total - collections.len(),
    signed_in = active_customer.customer.is_some(),
    channel = %active_channel.code,
    "root data loaded"
  );

  Ok(PageLoadResult { active_customer, active_channel, collections })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{StubBackend, channel, collection};

  #[test]
  fn filter_keeps_root_children_in_order() {
    let input = vec![
      collection("a", Some("__root_collection__")),
      collection("b", Some("electronics")),
      collection("c", None),
      collection("d", Some("__root_collection__")),
    ];
    let ids: Vec<_> = top_level_collections(input).into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["a", "d"]);
  }

  #[tokio::test]
  async fn anonymous_request_end_to_end() {
    let backend = StubBackend::new()
      .with_collections(vec![
        collection("1", Some("__root_collection__")),
        collection("2", Some("electronics")),
        collection("3", Some("__root_collection__")),
        collection("4", None),
        collection("5", Some("home-garden")),
      ])
      .with_channel(Some(channel("default")));
    let ctx = RequestContext::anonymous("/");

    let result = load_root(&backend, &ctx).await.unwrap();
    assert!(result.active_customer.customer.is_none());
    assert_eq!(result.collections.len(), 2);
    assert_eq!(result.active_channel.code, "default");
    assert!(result.forwarded_headers().is_empty());
  }

  #[tokio::test]
  async fn customer_headers_survive_without_customer() {
    let backend = StubBackend::new()
      .with_channel(Some(channel("default")))
      .with_customer_header("Set-Cookie", "x");
    let result = load_root(&backend, &RequestContext::anonymous("/")).await.unwrap();
    assert!(result.active_customer.customer.is_none());
    assert_eq!(result.forwarded_headers().get("set-cookie"), Some("x"));
  }

  #[tokio::test]
  async fn missing_channel_fails_load() {
    let backend = StubBackend::new().with_channel(None);
    let err = load_root(&backend, &RequestContext::anonymous("/")).await.unwrap_err();
    assert_eq!(err.code(), "MISSING_CHANNEL");
  }

  #[tokio::test]
  async fn any_fetch_failure_fails_load() {
    let backend =
      StubBackend::new().with_channel(Some(channel("default"))).failing("list_collections");
    let err = load_root(&backend, &RequestContext::anonymous("/")).await.unwrap_err();
    assert_eq!(err.code(), "UPSTREAM_ERROR");

    let backend =
      StubBackend::new().with_channel(Some(channel("default"))).failing("active_customer");
    assert!(load_root(&backend, &RequestContext::anonymous("/")).await.is_err());
  }

  #[test]
  fn serialized_shape_matches_client_contract() {
    let result = PageLoadResult {
      active_customer: ActiveCustomer::default(),
      active_channel: channel("default"),
      collections: vec![collection("1", Some("__root_collection__"))],
    };
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["activeCustomer"].is_null());
    assert_eq!(json["activeChannel"]["code"], "default");
    assert_eq!(json["collections"][0]["parent"]["name"], "__root_collection__");
  }
}
