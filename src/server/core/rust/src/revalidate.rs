/* src/server/core/rust/src/revalidate.rs */

use std::collections::HashMap;

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const ACCOUNT_PATH: &str = "/account";
pub const HOME_PATH: &str = "/";

/// A form submission in flight during a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub method: String,
  pub action: String,
  pub form: Vec<(String, String)>,
}

/// A client-side navigation between two URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationTransition {
  pub prev_url: String,
  pub next_url: String,
  pub params: HashMap<String, String>,
  pub submission: Option<Submission>,
}

impl NavigationTransition {
  pub fn new(prev_url: impl Into<String>, next_url: impl Into<String>) -> Self {
    Self { prev_url: prev_url.into(), next_url: next_url.into(), ..Self::default() }
  }

  pub fn prev_path(&self) -> &str {
    url_path(&self.prev_url)
  }

  pub fn next_path(&self) -> &str {
    url_path(&self.next_url)
  }

  /// Whether the root data must be reloaded for this navigation. Params and
  /// submission do not take part in the decision.
  pub fn should_revalidate(&self) -> bool {
    should_revalidate(self.prev_path(), self.next_path())
  }
}

/// Root data (channel, collections) is static across ordinary navigation.
/// Only the transitions that can change the signed-in customer force a reload:
/// leaving the sign-in page, and leaving the account page (where sign-out
/// lives) for the home page.
pub fn should_revalidate(prev_path: &str, next_path: &str) -> bool {
  if prev_path == SIGN_IN_PATH {
    return true;
  }
  if prev_path == ACCOUNT_PATH && next_path == HOME_PATH {
    return true;
  }
  false
}

/// Strip scheme+authority, query and fragment, leaving the path. Matching
/// is exact afterwards: `/sign-in/` is not `/sign-in`.
pub fn url_path(url: &str) -> &str {
  let absolute = if url.starts_with('/') { None } else { url.find("://") };
  let rest = match absolute {
    Some(idx) => {
      let after = &url[idx + 3..];
      match after.find('/') {
        Some(slash) => &after[slash..],
        None => "/",
      }
    }
    None => url,
  };
  let end = rest.find(['?', '#']).unwrap_or(rest.len());
  &rest[..end]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leaving_sign_in_always_reloads() {
    for next in ["/", "/account", "/products/a", "/sign-in", ""] {
      assert!(should_revalidate("/sign-in", next), "next = {next}");
    }
  }

  #[test]
  fn account_to_home_reloads() {
    assert!(should_revalidate("/account", "/"));
  }

  #[test]
  fn account_elsewhere_does_not_reload() {
    assert!(!should_revalidate("/account", "/products/a"));
    assert!(!should_revalidate("/account", "/account/orders"));
  }

  #[test]
  fn ordinary_navigation_reuses_data() {
    assert!(!should_revalidate("/products/a", "/products/b"));
    assert!(!should_revalidate("/", "/sign-in"));
    assert!(!should_revalidate("/", "/account"));
    assert!(!should_revalidate("", ""));
  }

  #[test]
  fn path_matching_is_exact() {
    assert!(!should_revalidate("/sign-in/", "/"));
    assert!(!should_revalidate("/Sign-In", "/"));
    assert!(!should_revalidate("/account/", "/"));
  }

  #[test]
  fn transition_ignores_query_and_origin() {
    let t = NavigationTransition::new("https://shop.example/sign-in?redirect=/cart", "/");
    assert_eq!(t.prev_path(), "/sign-in");
    assert!(t.should_revalidate());

    let t = NavigationTransition::new("/account#orders", "http://shop.example");
    assert_eq!(t.next_path(), "/");
    assert!(t.should_revalidate());
  }

  #[test]
  fn params_and_submission_do_not_matter() {
    let mut t = NavigationTransition::new("/products/a", "/products/b");
    t.params.insert("slug".to_string(), "b".to_string());
    t.submission = Some(Submission {
      method: "POST".to_string(),
      action: "/api/active-order".to_string(),
      form: vec![("action".to_string(), "addItemToOrder".to_string())],
    });
    assert!(!t.should_revalidate());
  }
}
