/* src/server/core/rust/src/testing.rs */

//! In-memory `CommerceBackend` and entity builders for tests in this crate
//! and in adapter crates (enable the `testing` feature).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use futures_util::lock::Mutex as AsyncMutex;

use crate::backend::{CommerceBackend, RequestContext};
use crate::commerce::{
  ActiveCustomer, ActiveOrder, Channel, Collection, CollectionParent, Customer, ForwardedHeaders,
  OrderLine, OrderResult, ProductVariant,
};
use crate::errors::StorefrontError;

pub fn collection(id: &str, parent: Option<&str>) -> Collection {
  Collection {
    id: id.to_string(),
    name: format!("Collection {id}"),
    slug: format!("collection-{id}"),
    parent: parent.map(|name| CollectionParent { name: name.to_string() }),
    featured_asset: None,
  }
}

pub fn channel(code: &str) -> Channel {
  Channel {
    id: "1".to_string(),
    code: code.to_string(),
    token: format!("{code}-token"),
    default_currency_code: Some("USD".to_string()),
    default_language_code: Some("en".to_string()),
  }
}

pub fn customer(first_name: &str) -> Customer {
  Customer {
    id: "1".to_string(),
    title: None,
    first_name: first_name.to_string(),
    last_name: "Tester".to_string(),
    email_address: format!("{}@example.com", first_name.to_lowercase()),
  }
}

/// An order whose lines have the given quantities, priced at 1000 each.
pub fn order(quantities: &[u32]) -> ActiveOrder {
  let lines: Vec<OrderLine> = quantities
    .iter()
    .enumerate()
    .map(|(i, &quantity)| OrderLine {
      id: format!("line-{}", i + 1),
      quantity,
      line_price_with_tax: i64::from(quantity) * 1000,
      product_variant: ProductVariant {
        id: format!("variant-{}", i + 1),
        name: format!("Variant {}", i + 1),
      },
      featured_asset: None,
    })
    .collect();
  recompute(ActiveOrder {
    id: "order-1".to_string(),
    code: "ORDER1".to_string(),
    state: "AddingItems".to_string(),
    total_quantity: 0,
    sub_total_with_tax: 0,
    total_with_tax: 0,
    currency_code: "USD".to_string(),
    lines,
  })
}

fn recompute(mut order: ActiveOrder) -> ActiveOrder {
  order.total_quantity = order.lines.iter().map(|l| l.quantity).sum();
  order.sub_total_with_tax = order.lines.iter().map(|l| l.line_price_with_tax).sum();
  order.total_with_tax = order.sub_total_with_tax;
  order
}

#[derive(Default)]
pub struct StubBackend {
  collections: Vec<Collection>,
  channel: Option<Channel>,
  customer: Option<Customer>,
  customer_headers: ForwardedHeaders,
  order: Mutex<Option<ActiveOrder>>,
  order_headers: ForwardedHeaders,
  failing: HashSet<&'static str>,
  order_gate: Option<Arc<AsyncMutex<()>>>,
  calls: AtomicUsize,
}

impl StubBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_collections(mut self, collections: Vec<Collection>) -> Self {
    self.collections = collections;
    self
  }

  pub fn with_channel(mut self, channel: Option<Channel>) -> Self {
    self.channel = channel;
    self
  }

  pub fn with_customer(mut self, customer: Customer) -> Self {
    self.customer = Some(customer);
    self
  }

  pub fn with_customer_header(mut self, name: &str, value: &str) -> Self {
    self.customer_headers.append(name, value);
    self
  }

  pub fn with_order(self, order: ActiveOrder) -> Self {
    *self.order.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(order);
    self
  }

  pub fn with_order_header(mut self, name: &str, value: &str) -> Self {
    self.order_headers.append(name, value);
    self
  }

  /// Make the named operation return `UPSTREAM_ERROR`.
  pub fn failing(mut self, op: &'static str) -> Self {
    self.failing.insert(op);
    self
  }

  /// Order operations wait until `gate` is unlocked, so a test can hold a
  /// call in flight.
  pub fn with_order_gate(mut self, gate: Arc<AsyncMutex<()>>) -> Self {
    self.order_gate = Some(gate);
    self
  }

  /// Number of backend operations invoked so far.
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  fn enter(&self, op: &'static str) -> Result<(), StorefrontError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.failing.contains(op) {
      return Err(StorefrontError::upstream(format!("{op} unavailable")));
    }
    Ok(())
  }

  async fn pass_order_gate(&self) {
    if let Some(ref gate) = self.order_gate {
      drop(gate.lock().await);
    }
  }

  fn order_result(&self) -> OrderResult {
    let order = self.order.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone();
    OrderResult { order, headers: self.order_headers.clone() }
  }

  fn edit_order(&self, edit: impl FnOnce(&mut Vec<OrderLine>)) -> OrderResult {
    {
      let mut guard = self.order.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
      if let Some(mut current) = guard.take() {
        edit(&mut current.lines);
        *guard = Some(recompute(current));
      }
    }
    self.order_result()
  }
}

impl CommerceBackend for StubBackend {
  fn list_collections<'a>(
    &'a self,
    _ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<Vec<Collection>, StorefrontError>> {
    Box::pin(async move {
      self.enter("list_collections")?;
      Ok(self.collections.clone())
    })
  }

  fn active_channel<'a>(
    &'a self,
    _ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<Option<Channel>, StorefrontError>> {
    Box::pin(async move {
      self.enter("active_channel")?;
      Ok(self.channel.clone())
    })
  }

  fn active_customer<'a>(
    &'a self,
    _ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<ActiveCustomer, StorefrontError>> {
    Box::pin(async move {
      self.enter("active_customer")?;
      Ok(ActiveCustomer { customer: self.customer.clone(), headers: self.customer_headers.clone() })
    })
  }

  fn active_order<'a>(
    &'a self,
    _ctx: &'a RequestContext,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>> {
    Box::pin(async move {
      self.enter("active_order")?;
      self.pass_order_gate().await;
      Ok(self.order_result())
    })
  }

  fn adjust_order_line<'a>(
    &'a self,
    _ctx: &'a RequestContext,
    order_line_id: &'a str,
    quantity: u32,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>> {
    Box::pin(async move {
      self.enter("adjust_order_line")?;
      self.pass_order_gate().await;
      Ok(self.edit_order(|lines| {
        for line in lines.iter_mut().filter(|l| l.id == order_line_id) {
          let unit = line.line_price_with_tax / i64::from(line.quantity.max(1));
          line.quantity = quantity;
          line.line_price_with_tax = unit * i64::from(quantity);
        }
      }))
    })
  }

  fn remove_order_line<'a>(
    &'a self,
    _ctx: &'a RequestContext,
    order_line_id: &'a str,
  ) -> BoxFuture<'a, Result<OrderResult, StorefrontError>> {
    Box::pin(async move {
      self.enter("remove_order_line")?;
      self.pass_order_gate().await;
      Ok(self.edit_order(|lines| lines.retain(|l| l.id != order_line_id)))
    })
  }
}
