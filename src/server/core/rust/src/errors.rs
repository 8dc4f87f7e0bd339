/* src/server/core/rust/src/errors.rs */

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct StorefrontError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "UPSTREAM_ERROR" | "MISSING_CHANNEL" => 502,
    "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl StorefrontError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  /// A call to the commerce API failed: transport, HTTP status, decoding, or
  /// GraphQL-level errors.
  pub fn upstream(msg: impl Into<String>) -> Self {
    Self::with_code("UPSTREAM_ERROR", msg)
  }

  /// The backend resolved no channel for the request. The root page cannot
  /// render without one.
  pub fn missing_channel() -> Self {
    Self::with_code("MISSING_CHANNEL", "no active channel for request")
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_status_known_codes() {
    assert_eq!(default_status("VALIDATION_ERROR"), 400);
    assert_eq!(default_status("NOT_FOUND"), 404);
    assert_eq!(default_status("UPSTREAM_ERROR"), 502);
    assert_eq!(default_status("MISSING_CHANNEL"), 502);
    assert_eq!(default_status("INTERNAL_ERROR"), 500);
  }

  #[test]
  fn default_status_unknown_code() {
    assert_eq!(default_status("CUSTOM_ERROR"), 500);
  }

  #[test]
  fn new_explicit_status() {
    let err = StorefrontError::new("UPSTREAM_ERROR", "gateway timeout", 504);
    assert_eq!(err.code(), "UPSTREAM_ERROR");
    assert_eq!(err.message(), "gateway timeout");
    assert_eq!(err.status(), 504);
  }

  #[test]
  fn missing_channel_is_upstream_class() {
    let err = StorefrontError::missing_channel();
    assert_eq!(err.code(), "MISSING_CHANNEL");
    assert_eq!(err.status(), 502);
  }

  #[test]
  fn display_format() {
    let err = StorefrontError::upstream("connection refused");
    assert_eq!(err.to_string(), "UPSTREAM_ERROR: connection refused");
  }
}
