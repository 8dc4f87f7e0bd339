/* src/server/client/graphql/src/documents.rs */

// GraphQL documents sent to the shop API.

pub(crate) const COLLECTIONS: &str = r#"query collections($options: CollectionListOptions) {
  collections(options: $options) {
    items { id name slug parent { name } featuredAsset { id preview } }
  }
}"#;

pub(crate) const ACTIVE_CHANNEL: &str = r#"query activeChannel {
  activeChannel { id code token defaultCurrencyCode defaultLanguageCode }
}"#;

pub(crate) const ACTIVE_CUSTOMER: &str = r#"query activeCustomer {
  activeCustomer { id title firstName lastName emailAddress }
}"#;

const ORDER_DETAIL: &str = r#"fragment OrderDetail on Order {
  id code state totalQuantity subTotalWithTax totalWithTax currencyCode
  lines {
    id quantity linePriceWithTax
    featuredAsset { id preview }
    productVariant { id name }
  }
}"#;

pub(crate) fn active_order() -> String {
  format!("query activeOrder {{ activeOrder {{ ...OrderDetail }} }}\n{ORDER_DETAIL}")
}

pub(crate) fn adjust_order_line() -> String {
  format!(
    concat!(
      "mutation adjustOrderLine($orderLineId: ID!, $quantity: Int!) {{ ",
      "adjustOrderLine(orderLineId: $orderLineId, quantity: $quantity) {{ ",
      "...OrderDetail ... on ErrorResult {{ errorCode message }} }} }}\n{}"
    ),
    ORDER_DETAIL
  )
}

pub(crate) fn remove_order_line() -> String {
  format!(
    concat!(
      "mutation removeOrderLine($orderLineId: ID!) {{ ",
      "removeOrderLine(orderLineId: $orderLineId) {{ ",
      "...OrderDetail ... on ErrorResult {{ errorCode message }} }} }}\n{}"
    ),
    ORDER_DETAIL
  )
}
