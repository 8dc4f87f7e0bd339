/* src/server/core/rust/src/server.rs */

use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::CommerceBackend;
use crate::page::{BuildMode, EmptyOutlet, Outlet, ShellConfig};
use crate::session::SessionCookie;

/// Framework-agnostic parts extracted from `Storefront`.
/// Adapter crates consume this to build framework-specific routers.
pub struct StorefrontParts {
  pub backend: Arc<dyn CommerceBackend>,
  pub outlet: Arc<dyn Outlet>,
  pub shell: ShellConfig,
  pub session: SessionCookie,
  /// Directory served for `/styles/*`, `/favicon.ico` and other static assets.
  pub public_dir: Option<PathBuf>,
}

impl StorefrontParts {
  pub fn is_development(&self) -> bool {
    self.shell.mode.is_development()
  }
}

pub struct Storefront {
  backend: Arc<dyn CommerceBackend>,
  outlet: Arc<dyn Outlet>,
  shell: ShellConfig,
  session: SessionCookie,
  public_dir: Option<PathBuf>,
}

impl Storefront {
  pub fn new(backend: Arc<dyn CommerceBackend>) -> Self {
    Self {
      backend,
      outlet: Arc::new(EmptyOutlet),
      shell: ShellConfig::default(),
      session: SessionCookie::default(),
      public_dir: None,
    }
  }

  pub fn outlet(mut self, outlet: Arc<dyn Outlet>) -> Self {
    self.outlet = outlet;
    self
  }

  pub fn mode(mut self, mode: BuildMode) -> Self {
    self.shell.mode = mode;
    self
  }

  pub fn shell(mut self, shell: ShellConfig) -> Self {
    self.shell = shell;
    self
  }

  pub fn session_cookie(mut self, session: SessionCookie) -> Self {
    self.session = session;
    self
  }

  pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.public_dir = Some(dir.into());
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  pub fn into_parts(self) -> StorefrontParts {
    StorefrontParts {
      backend: self.backend,
      outlet: self.outlet,
      shell: self.shell,
      session: self.session,
      public_dir: self.public_dir,
    }
  }
}
