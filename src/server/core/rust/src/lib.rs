/* src/server/core/rust/src/lib.rs */

pub mod backend;
pub mod commerce;
pub mod context;
pub mod errors;
pub mod escape;
pub mod loader;
pub mod order;
pub mod page;
pub mod revalidate;
pub mod server;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports for ergonomic use
pub use backend::{CommerceBackend, RequestContext};
pub use commerce::{
  ActiveCustomer, ActiveOrder, Asset, Channel, Collection, CollectionParent, Customer,
  ForwardedHeaders, OrderLine, OrderResult, ProductVariant, ROOT_COLLECTION_NAME,
};
pub use context::{CartTray, Header, InteractionContext};
pub use errors::StorefrontError;
pub use loader::{PageLoadResult, load_root, top_level_collections};
pub use order::ActiveOrderHandle;
pub use page::{BuildMode, EmptyOutlet, Outlet, ShellConfig, cart_quantity, render_root_page};
pub use revalidate::{NavigationTransition, Submission, should_revalidate};
pub use server::{Storefront, StorefrontParts};
pub use session::SessionCookie;

/// Boxed future returned by [`CommerceBackend`] operations.
pub use futures_util::future::BoxFuture;
