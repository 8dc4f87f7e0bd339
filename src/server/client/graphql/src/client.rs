/* src/server/client/graphql/src/client.rs */

use serde::Deserialize;
use serde::de::DeserializeOwned;
use storefront_server::{
  ActiveCustomer, ActiveOrder, BoxFuture, Channel, Collection, CommerceBackend, Customer,
  ForwardedHeaders, OrderResult, RequestContext, SessionCookie, StorefrontError,
};
use tracing::{debug, warn};

use crate::documents;

pub const DEFAULT_AUTH_TOKEN_HEADER: &str = "vendure-auth-token";
pub const CHANNEL_TOKEN_HEADER: &str = "vendure-token";

#[derive(Debug, Clone)]
pub struct GraphqlConfig {
  /// Shop API endpoint, e.g. `http://localhost:3000/shop-api`.
  pub api_url: String,
  /// Sent as `vendure-token` to select a non-default channel.
  pub channel_token: Option<String>,
  /// Response header carrying a new or rotated session token.
  pub auth_token_header: String,
  pub session: SessionCookie,
}

impl GraphqlConfig {
  pub fn new(api_url: impl Into<String>) -> Self {
    Self {
      api_url: api_url.into(),
      channel_token: None,
      auth_token_header: DEFAULT_AUTH_TOKEN_HEADER.to_string(),
      session: SessionCookie::default(),
    }
  }
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
  data: Option<T>,
  #[serde(default)]
  errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
  message: String,
}

#[derive(Deserialize)]
struct CollectionsData {
  collections: CollectionList,
}

#[derive(Deserialize)]
struct CollectionList {
  items: Vec<Collection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveChannelData {
  active_channel: Option<Channel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveCustomerData {
  active_customer: Option<Customer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveOrderData {
  active_order: Option<ActiveOrder>,
}

/// Order mutations answer with either the order or an `ErrorResult`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrderMutationResult {
  Order(ActiveOrder),
  #[serde(rename_all = "camelCase")]
  Error { error_code: String, message: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdjustOrderLineData {
  adjust_order_line: OrderMutationResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveOrderLineData {
  remove_order_line: OrderMutationResult,
}

fn mutation_result(
  result: OrderMutationResult,
  headers: ForwardedHeaders,
) -> Result<OrderResult, StorefrontError> {
  match result {
    OrderMutationResult::Order(order) => Ok(OrderResult { order: Some(order), headers }),
    OrderMutationResult::Error { error_code, message } => {
      Err(StorefrontError::validation(format!("{error_code}: {message}")))
    }
  }
}

/// `CommerceBackend` over a Vendure-style GraphQL shop API.
///
/// The visitor's session token travels as a bearer token. When the API
/// issues a new one the client turns it into a `Set-Cookie` for the
/// storefront session, returned alongside the result for forwarding.
#[derive(Clone)]
pub struct GraphqlBackend {
  http: reqwest::Client,
  config: GraphqlConfig,
}

impl GraphqlBackend {
  pub fn new(config: GraphqlConfig) -> Self {
    Self::with_client(reqwest::Client::new(), config)
  }

  pub fn with_client(http: reqwest::Client, config: GraphqlConfig) -> Self {
    Self { http, config }
  }

  pub fn config(&self) -> &GraphqlConfig {
    &self.config
  }

  async fn execute<T: DeserializeOwned>(
    &self,
    ctx: &RequestContext,
    operation: &str,
    query: &str,
    variables: serde_json::Value,
  ) -> Result<(T, ForwardedHeaders), StorefrontError> {
    let mut req = self
      .http
      .post(&self.config.api_url)
      .json(&serde_json::json!({ "query": query, "variables": variables }));
    if let Some(ref token) = ctx.auth_token {
      req = req.bearer_auth(token);
    }
    if let Some(ref channel) = self.config.channel_token {
      req = req.header(CHANNEL_TOKEN_HEADER, channel);
    }

    let resp = req.send().await.map_err(|e| {
      warn!(operation, error = %e, "shop API request failed");
      StorefrontError::upstream(format!("{operation}: shop API request failed: {e}"))
    })?;

    let status = resp.status();
    if !status.is_success() {
      warn!(operation, %status, "shop API returned error status");
      return Err(StorefrontError::upstream(format!("{operation}: shop API returned {status}")));
    }

    let mut forwarded = ForwardedHeaders::new();
    let issued = resp
      .headers()
      .get(self.config.auth_token_header.as_str())
      .and_then(|v| v.to_str().ok())
      .filter(|v| !v.is_empty())
      .map(str::to_string);
    if let Some(token) = issued
      && ctx.auth_token.as_deref() != Some(token.as_str())
    {
      debug!(operation, "shop API issued a new session token");
      forwarded.append("Set-Cookie", self.config.session.set_cookie(&token));
    }

    let body: GraphqlResponse<T> = resp.json().await.map_err(|e| {
      StorefrontError::upstream(format!("{operation}: failed to parse shop API response: {e}"))
    })?;

    if !body.errors.is_empty() {
      let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
      warn!(operation, errors = ?messages, "shop API returned GraphQL errors");
      return Err(StorefrontError::upstream(format!("{operation}: {}", messages.join("; "))));
    }

    let data = body
      .data
      .ok_or_else(|| StorefrontError::upstream(format!("{operation}: response had no data")))?;
    Ok((data, forwarded))
  }
}

impl CommerceBackend for GraphqlBackend {
  fn list_collections<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<Vec<Collection>, StorefrontError>> {
    Box::pin(async move {
      let (data, _) = self
        .execute::<CollectionsData>(ctx, "collections", documents::COLLECTIONS, serde_json::json!({}))
        .await?;
      Ok(data.collections.items)
    })
  }

  fn active_channel<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<Option<Channel>, StorefrontError>> {
    Box::pin(async move {
      let (data, _) = self
        .execute::<ActiveChannelData>(
          ctx,
          "activeChannel",
          documents::ACTIVE_CHANNEL,
          serde_json::json!({}),
        )
        .await?;
      Ok(data.active_channel)
    })
  }

  fn active_customer<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<ActiveCustomer, StorefrontError>> {
    Box::pin(async move {
      let (data, headers) = self
        .execute::<ActiveCustomerData>(
          ctx,
          "activeCustomer",
          documents::ACTIVE_CUSTOMER,
          serde_json::json!({}),
        )
        .await?;
      Ok(ActiveCustomer { customer: data.active_customer, headers })
    })
  }

  fn active_order<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>> {
    Box::pin(async move {
      let (data, headers) = self
        .execute::<ActiveOrderData>(
          ctx,
          "activeOrder",
          &documents::active_order(),
          serde_json::json!({}),
        )
        .await?;
      Ok(OrderResult { order: data.active_order, headers })
    })
  }

  fn adjust_order_line<'a>(
    &'a self,
    ctx: &'a RequestContext,
    order_line_id: &'a str,
    quantity: u32,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>> {
    Box::pin(async move {
      let (data, headers) = self
        .execute::<AdjustOrderLineData>(
          ctx,
          "adjustOrderLine",
          &documents::adjust_order_line(),
          serde_json::json!({ "orderLineId": order_line_id, "quantity": quantity }),
        )
        .await?;
      mutation_result(data.adjust_order_line, headers)
    })
  }

  fn remove_order_line<'a>(
    &'a self,
    ctx: &'a RequestContext,
    order_line_id: &'a str,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>> {
    Box::pin(async move {
      let (data, headers) = self
        .execute::<RemoveOrderLineData>(
          ctx,
          "removeOrderLine",
          &documents::remove_order_line(),
          serde_json::json!({ "orderLineId": order_line_id }),
        )
        .await?;
      mutation_result(data.remove_order_line, headers)
    })
  }
}
