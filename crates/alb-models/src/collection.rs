use serde::{Deserialize, Serialize};

/// Envelope returned by every collection (list) endpoint.
///
/// `results` preserves the server's ordering verbatim. `next` is an opaque
/// continuation URL; it is absent on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
  /// Total number of objects matching the query, across all pages.
  pub count: u64,

  /// URL of the next page, absent when this is the last page.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next: Option<String>,

  /// Objects on this page, in server order.
  pub results: Vec<T>,
}

/// Standard result header included in controller error responses.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiResult {
  /// Matches the HTTP status code of the response.
  pub code: Option<i32>,

  /// Short description of the result of the requested operation.
  pub message: Option<String>,
}
