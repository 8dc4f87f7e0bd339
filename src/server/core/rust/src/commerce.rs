/* src/server/core/rust/src/commerce.rs */

//! Entities read from the commerce API. Field names serialize in camelCase so
//! the loader data island matches the shape client code reads.

use serde::{Deserialize, Serialize};

/// Name of the synthetic collection whose direct children are the
/// storefront's top-level navigable collections.
pub const ROOT_COLLECTION_NAME: &str = "__root_collection__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
  pub id: String,
  pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionParent {
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  pub id: String,
  pub name: String,
  pub slug: String,
  #[serde(default)]
  pub parent: Option<CollectionParent>,
  #[serde(default)]
  pub featured_asset: Option<Asset>,
}

impl Collection {
  /// True when this collection hangs directly off the root collection.
  pub fn is_top_level(&self) -> bool {
    self.parent.as_ref().is_some_and(|p| p.name == ROOT_COLLECTION_NAME)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
  pub id: String,
  pub code: String,
  pub token: String,
  #[serde(default)]
  pub default_currency_code: Option<String>,
  #[serde(default)]
  pub default_language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
  pub id: String,
  #[serde(default)]
  pub title: Option<String>,
  pub first_name: String,
  pub last_name: String,
  pub email_address: String,
}

/// Response headers an upstream call asks to have forwarded on the outer
/// response. Kept as an ordered list because `Set-Cookie` may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders(Vec<(String, String)>);

impl ForwardedHeaders {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.0.push((name.into(), value.into()));
  }

  pub fn extend(&mut self, other: ForwardedHeaders) {
    self.0.extend(other.0);
  }

  /// First value for `name`, compared case-insensitively.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }
}

/// Result of "get active customer": the entity (absent for anonymous
/// sessions) plus headers that must reach the client unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveCustomer {
  pub customer: Option<Customer>,
  #[serde(skip)]
  pub headers: ForwardedHeaders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub id: String,
  pub quantity: u32,
  pub line_price_with_tax: i64,
  pub product_variant: ProductVariant,
  #[serde(default)]
  pub featured_asset: Option<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOrder {
  pub id: String,
  pub code: String,
  pub state: String,
  pub total_quantity: u32,
  pub sub_total_with_tax: i64,
  pub total_with_tax: i64,
  pub currency_code: String,
  #[serde(default)]
  pub lines: Vec<OrderLine>,
}

/// Outcome of an active-order read or mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderResult {
  pub order: Option<ActiveOrder>,
  pub headers: ForwardedHeaders,
}

/// Format a minor-unit amount (cents) for display, e.g. `1299` + `USD` ->
/// `"USD 12.99"`.
pub fn format_price(amount: i64, currency_code: &str) -> String {
  let sign = if amount < 0 { "-" } else { "" };
  let abs = amount.unsigned_abs();
  format!("{currency_code} {sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn collection(id: &str, parent: Option<&str>) -> Collection {
    Collection {
      id: id.to_string(),
      name: format!("Collection {id}"),
      slug: id.to_string(),
      parent: parent.map(|name| CollectionParent { name: name.to_string() }),
      featured_asset: None,
    }
  }

  #[test]
  fn top_level_requires_exact_root_parent() {
    assert!(collection("1", Some("__root_collection__")).is_top_level());
    assert!(!collection("2", Some("electronics")).is_top_level());
    assert!(!collection("3", Some("__ROOT_COLLECTION__")).is_top_level());
    assert!(!collection("4", None).is_top_level());
  }

  #[test]
  fn forwarded_headers_keep_repeats_in_order() {
    let mut headers = ForwardedHeaders::new();
    headers.append("Set-Cookie", "a=1");
    headers.append("Set-Cookie", "b=2");
    let values: Vec<_> = headers.iter().map(|(_, v)| v).collect();
    assert_eq!(values, vec!["a=1", "b=2"]);
    assert_eq!(headers.get("set-cookie"), Some("a=1"));
  }

  #[test]
  fn active_customer_serializes_as_entity_only() {
    let mut active = ActiveCustomer::default();
    active.headers.append("Set-Cookie", "x");
    assert_eq!(serde_json::to_value(&active).unwrap(), serde_json::Value::Null);

    active.customer = Some(Customer {
      id: "7".to_string(),
      title: None,
      first_name: "Ada".to_string(),
      last_name: "Lovelace".to_string(),
      email_address: "ada@example.com".to_string(),
    });
    let json = serde_json::to_value(&active).unwrap();
    assert_eq!(json["firstName"], "Ada");
    assert!(json.get("headers").is_none());
  }

  #[test]
  fn format_price_minor_units() {
    assert_eq!(format_price(1299, "USD"), "USD 12.99");
    assert_eq!(format_price(5, "EUR"), "EUR 0.05");
    assert_eq!(format_price(-250, "GBP"), "GBP -2.50");
  }
}
