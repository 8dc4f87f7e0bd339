/* src/server/core/rust/src/context.rs */

use std::sync::Arc;

use crate::order::ActiveOrderHandle;

/// Shared state handed down to every region of the root page.
///
/// Built once per page and passed by reference. Nested content sees a
/// shared borrow, so it can drive the order handle but cannot touch the
/// cart tray flag; only [`Header::on_cart_icon_click`] and
/// [`CartTray::on_close`] change it.
pub struct InteractionContext {
  order: Arc<ActiveOrderHandle>,
  tray_open: bool,
}

impl InteractionContext {
  /// Mount a fresh context. The cart tray starts closed.
  pub fn new(order: Arc<ActiveOrderHandle>) -> Self {
    Self { order, tray_open: false }
  }

  pub fn order(&self) -> &ActiveOrderHandle {
    &self.order
  }

  pub fn is_tray_open(&self) -> bool {
    self.tray_open
  }
}

/// Header region behaviour.
pub struct Header;

impl Header {
  /// Clicking the cart icon flips the tray.
  pub fn on_cart_icon_click(ctx: &mut InteractionContext) {
    ctx.tray_open = !ctx.tray_open;
  }
}

/// Cart tray region behaviour.
pub struct CartTray;

impl CartTray {
  pub fn on_close(ctx: &mut InteractionContext) {
    ctx.tray_open = false;
  }
}
