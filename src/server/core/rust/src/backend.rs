/* src/server/core/rust/src/backend.rs */

use futures_util::future::BoxFuture;

use crate::commerce::{ActiveCustomer, Channel, Collection, OrderResult};
use crate::errors::StorefrontError;

/// Per-request facts a backend needs to act on behalf of the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
  /// Path of the request being served, without query string.
  pub path: String,
  /// Upstream session token recovered from the storefront session cookie.
  pub auth_token: Option<String>,
}

impl RequestContext {
  pub fn new(path: impl Into<String>, auth_token: Option<String>) -> Self {
    Self { path: path.into(), auth_token }
  }

  pub fn anonymous(path: impl Into<String>) -> Self {
    Self::new(path, None)
  }
}

/// Read and order operations the root shell consumes from the commerce API.
///
/// The three root reads are idempotent. Order operations may rotate the
/// session, which is why they hand back headers alongside the order.
pub trait CommerceBackend: Send + Sync {
  fn list_collections<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<Vec<Collection>, StorefrontError>>;

  /// `Ok(None)` means the API answered but resolved no channel.
  fn active_channel<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<Option<Channel>, StorefrontError>>;

  fn active_customer<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<ActiveCustomer, StorefrontError>>;

  fn active_order<'a>(
    &'a self,
    ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>>;

  fn adjust_order_line<'a>(
    &'a self,
    ctx: &'a RequestContext,
    order_line_id: &'a str,
    quantity: u32,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>>;

  fn remove_order_line<'a>(
    &'a self,
    ctx: &'a RequestContext,
    order_line_id: &'a str,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>>;
}
