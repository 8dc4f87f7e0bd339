/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use serde::Deserialize;
use storefront_graphql::DEFAULT_AUTH_TOKEN_HEADER;
use storefront_server::BuildMode;
use storefront_server::session::DEFAULT_SESSION_COOKIE;

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
  #[serde(default)]
  pub server: ServerSection,
  pub api: ApiSection,
  #[serde(default)]
  pub app: AppSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  #[serde(default = "default_public_dir")]
  pub public_dir: String,
  #[serde(default = "default_session_cookie")]
  pub session_cookie: String,
  #[serde(default)]
  pub secure_cookie: bool,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
      public_dir: default_public_dir(),
      session_cookie: default_session_cookie(),
      secure_cookie: false,
    }
  }
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_public_dir() -> String {
  "public".to_string()
}

fn default_session_cookie() -> String {
  DEFAULT_SESSION_COOKIE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
  pub url: String,
  pub channel_token: Option<String>,
  #[serde(default = "default_auth_token_header")]
  pub auth_token_header: String,
}

fn default_auth_token_header() -> String {
  DEFAULT_AUTH_TOKEN_HEADER.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Unset means "follow the build profile".
  #[serde(default)]
  pub mode: Option<BuildMode>,
  #[serde(default = "default_log_level")]
  pub log_level: String,
  pub title: Option<String>,
}

impl Default for AppSection {
  fn default() -> Self {
    Self { mode: None, log_level: default_log_level(), title: None }
  }
}

fn default_log_level() -> String {
  "info".to_string()
}

impl StorefrontConfig {
  pub fn validate(&self) -> Result<()> {
    let url = self.api.url.trim();
    if url.is_empty() {
      bail!("api.url must not be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
      bail!("api.url \"{url}\" must start with http:// or https://");
    }
    if self.server.session_cookie.is_empty() {
      bail!("server.session_cookie must not be empty");
    }
    if self.api.auth_token_header.is_empty() {
      bail!("api.auth_token_header must not be empty");
    }
    Ok(())
  }

  pub fn build_mode(&self) -> BuildMode {
    self.app.mode.unwrap_or_default()
  }

  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }
}
