/* src/server/core/rust/src/session.rs */

pub const DEFAULT_SESSION_COOKIE: &str = "storefront_session";

/// The cookie that carries the upstream auth token between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
  name: String,
  secure: bool,
}

impl Default for SessionCookie {
  fn default() -> Self {
    Self::new(DEFAULT_SESSION_COOKIE)
  }
}

impl SessionCookie {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), secure: false }
  }

  pub fn secure(mut self, secure: bool) -> Self {
    self.secure = secure;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Pull the token out of a `Cookie` request header. Empty values count as
  /// no session.
  pub fn token_from_header(&self, cookie_header: &str) -> Option<String> {
    cookie_header
      .split(';')
      .filter_map(|pair| pair.trim().split_once('='))
      .find(|(k, _)| *k == self.name)
      .map(|(_, v)| v.trim().to_string())
      .filter(|v| !v.is_empty())
  }

  /// `Set-Cookie` value storing `token`.
  pub fn set_cookie(&self, token: &str) -> String {
    let mut value = format!("{}={token}; Path=/; HttpOnly; SameSite=Lax", self.name);
    if self.secure {
      value.push_str("; Secure");
    }
    value
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_token_among_other_cookies() {
    let s = SessionCookie::default();
    let header = "theme=dark; storefront_session=abc123 ; other=1";
    assert_eq!(s.token_from_header(header), Some("abc123".to_string()));
  }

  #[test]
  fn missing_or_empty_cookie_is_anonymous() {
    let s = SessionCookie::default();
    assert_eq!(s.token_from_header("theme=dark"), None);
    assert_eq!(s.token_from_header("storefront_session="), None);
    assert_eq!(s.token_from_header(""), None);
  }

  #[test]
  fn name_must_match_exactly() {
    let s = SessionCookie::new("sid");
    assert_eq!(s.token_from_header("xsid=1; sid=2"), Some("2".to_string()));
  }

  #[test]
  fn set_cookie_attributes() {
    assert_eq!(
      SessionCookie::new("sid").set_cookie("t"),
      "sid=t; Path=/; HttpOnly; SameSite=Lax"
    );
    assert!(SessionCookie::new("sid").secure(true).set_cookie("t").ends_with("; Secure"));
  }
}
