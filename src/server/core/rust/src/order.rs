/* src/server/core/rust/src/order.rs */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::backend::{CommerceBackend, RequestContext};
use crate::commerce::{ActiveOrder, ForwardedHeaders, OrderResult};
use crate::errors::StorefrontError;

/// Page-scoped access to the visitor's active order.
///
/// Holds the latest order snapshot and the session headers that order calls
/// produced. Every operation may run independently of the others; the
/// in-flight count backs `is_fetching`.
pub struct ActiveOrderHandle {
  backend: Arc<dyn CommerceBackend>,
  ctx: RequestContext,
  order: Mutex<Option<ActiveOrder>>,
  headers: Mutex<ForwardedHeaders>,
  in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
  fn enter(counter: &'a AtomicUsize) -> Self {
    counter.fetch_add(1, Ordering::SeqCst);
    Self(counter)
  }
}

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.fetch_sub(1, Ordering::SeqCst);
  }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
  m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ActiveOrderHandle {
  pub fn new(backend: Arc<dyn CommerceBackend>, ctx: RequestContext) -> Self {
    Self {
      backend,
      ctx,
      order: Mutex::new(None),
      headers: Mutex::new(ForwardedHeaders::new()),
      in_flight: AtomicUsize::new(0),
    }
  }

  /// True while any order call issued through this handle is pending.
  pub fn is_fetching(&self) -> bool {
    self.in_flight.load(Ordering::SeqCst) > 0
  }

  pub fn active_order(&self) -> Option<ActiveOrder> {
    lock(&self.order).clone()
  }

  /// Total item count for the header badge; zero without an order.
  pub fn cart_quantity(&self) -> u32 {
    lock(&self.order).as_ref().map_or(0, |o| o.total_quantity)
  }

  /// Headers accumulated from every completed order call, in call order.
  pub fn take_headers(&self) -> ForwardedHeaders {
    std::mem::take(&mut *lock(&self.headers))
  }

  pub async fn refresh(&self) -> Result<Option<ActiveOrder>, StorefrontError> {
    let _guard = InFlight::enter(&self.in_flight);
    let result = self.backend.active_order(&self.ctx).await;
    self.apply(result, "refresh")
  }

  /// Set a line's quantity. Zero removes the line.
  pub async fn adjust_order_line(
    &self,
    order_line_id: &str,
    quantity: u32,
  ) -> Result<Option<ActiveOrder>, StorefrontError> {
    if quantity == 0 {
      return self.remove_item(order_line_id).await;
    }
    let _guard = InFlight::enter(&self.in_flight);
    let result = self.backend.adjust_order_line(&self.ctx, order_line_id, quantity).await;
    self.apply(result, "adjust_order_line")
  }

  pub async fn remove_item(
    &self,
    order_line_id: &str,
  ) -> Result<Option<ActiveOrder>, StorefrontError> {
    let _guard = InFlight::enter(&self.in_flight);
    let result = self.backend.remove_order_line(&self.ctx, order_line_id).await;
    self.apply(result, "remove_item")
  }

  /// Replace the snapshot on success; keep it on failure.
  fn apply(
    &self,
    result: Result<OrderResult, StorefrontError>,
    op: &str,
  ) -> Result<Option<ActiveOrder>, StorefrontError> {
    match result {
      Ok(OrderResult { order, headers }) => {
        lock(&self.headers).extend(headers);
        *lock(&self.order) = order.clone();
        Ok(order)
      }
      Err(e) => {
        warn!(op, path = %self.ctx.path, error = %e, "active order call failed");
        Err(e)
      }
    }
  }
}
