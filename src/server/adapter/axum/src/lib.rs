/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use storefront_server::Storefront;
use tokio::sync::broadcast;

/// Re-export storefront-server core for convenience
pub use storefront_server;

/// Signal that tells connected development browsers to reload.
/// Cloning shares the same channel.
#[derive(Clone)]
pub struct LiveReload {
  tx: broadcast::Sender<()>,
}

impl Default for LiveReload {
  fn default() -> Self {
    let (tx, _) = broadcast::channel(16);
    Self { tx }
  }
}

impl LiveReload {
  pub fn new() -> Self {
    Self::default()
  }

  /// Notify every connected browser. Returns how many were listening.
  pub fn trigger(&self) -> usize {
    self.tx.send(()).unwrap_or(0)
  }

  /// A receiver that yields once per `trigger`.
  pub fn subscribe(&self) -> broadcast::Receiver<()> {
    self.tx.subscribe()
  }
}

/// Extension trait that converts a `Storefront` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;

  /// Like `into_axum_router`, wiring an externally owned reload signal to the
  /// development socket. Production builds ignore it.
  fn into_axum_router_with_reload(self, reload: LiveReload) -> axum::Router;
}

impl IntoAxumRouter for Storefront {
  fn into_axum_router(self) -> axum::Router {
    handler::build_router(self.into_parts(), None)
  }

  fn into_axum_router_with_reload(self, reload: LiveReload) -> axum::Router {
    handler::build_router(self.into_parts(), Some(reload))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use storefront_server::testing::StubBackend;

  use super::*;

  #[test]
  fn into_axum_router_builds_without_panic() {
    let _router = Storefront::new(Arc::new(StubBackend::new())).into_axum_router();
  }

  #[test]
  fn trigger_without_listeners_is_harmless() {
    assert_eq!(LiveReload::new().trigger(), 0);
  }
}
