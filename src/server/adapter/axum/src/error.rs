/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storefront_server::StorefrontError;

/// Newtype wrapper to implement `IntoResponse` for `StorefrontError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for StorefrontError`
/// when both types are foreign to this crate.
#[derive(Debug)]
pub(crate) struct AxumError(pub StorefrontError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
        "transient": false,
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<StorefrontError> for AxumError {
  fn from(err: StorefrontError) -> Self {
    Self(err)
  }
}

#[cfg(test)]
mod tests {
  use http_body_util::BodyExt;

  use super::*;

  #[tokio::test]
  async fn upstream_error_maps_to_bad_gateway_json() {
    let resp = AxumError(StorefrontError::upstream("boom")).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"]["message"], "boom");
  }
}
