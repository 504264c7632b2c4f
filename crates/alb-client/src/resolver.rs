//! Maps raw transport responses to typed values or structured API errors.

use alb_models::{ApiResult, Collection};
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::{
  codec,
  error::{ApiError, ApiErrorKind, ClientError},
};

/// Status line and body of an executed request, as handed over by the
/// session. Decoding is entirely the resolver's business.
#[derive(Debug, Clone)]
pub struct RawResponse {
  pub status: StatusCode,
  pub body: Vec<u8>,
}

impl RawResponse {
  #[must_use]
  pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
    Self { status, body }
  }
}

/// Resolve a response expected to carry a single object of type `T`.
pub fn resolve_object<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ClientError> {
  if !response.status.is_success() {
    return Err(api_error(response).into());
  }
  Ok(codec::decode(&response.body)?)
}

/// Resolve a response expected to carry a `{count, next, results}` page.
/// Result order is preserved verbatim.
pub fn resolve_collection<T: DeserializeOwned>(response: &RawResponse) -> Result<Collection<T>, ClientError> {
  if !response.status.is_success() {
    return Err(api_error(response).into());
  }
  Ok(codec::decode(&response.body)?)
}

/// Resolve a response whose body, if any, is irrelevant (DELETE).
pub fn resolve_empty(response: &RawResponse) -> Result<(), ClientError> {
  if !response.status.is_success() {
    return Err(api_error(response).into());
  }
  Ok(())
}

/// Build the structured error for a non-2xx response. Decodes the standard
/// `{code, message}` envelope when present; otherwise falls back to the raw
/// body, then to the status line. Never fails.
fn api_error(response: &RawResponse) -> ApiError {
  let envelope: Option<ApiResult> = serde_json::from_slice(&response.body).ok();
  let message = envelope
    .and_then(|result| result.message)
    .unwrap_or_else(|| {
      let body = String::from_utf8_lossy(&response.body);
      let trimmed = body.trim();
      if trimmed.is_empty() {
        response.status.canonical_reason().unwrap_or("unknown error").to_string()
      } else {
        trimmed.to_string()
      }
    });

  ApiError {
    kind: ApiErrorKind::from_status(response.status),
    status: response.status,
    message,
  }
}

#[cfg(test)]
mod tests {
  use alb_models::Pool;

  use super::*;

  fn raw(status: u16, body: &str) -> RawResponse {
    RawResponse::new(StatusCode::from_u16(status).unwrap(), body.as_bytes().to_vec())
  }

  #[test]
  fn test_resolve_single_object() {
    let pool: Pool = resolve_object(&raw(200, r#"{"name":"p1","uuid":"pool-1"}"#)).unwrap();

    assert_eq!(pool.uuid.as_deref(), Some("pool-1"));
  }

  #[test]
  fn test_resolve_collection_preserves_order() {
    let page: Collection<Pool> =
      resolve_collection(&raw(200, r#"{"count":2,"results":[{"name":"b"},{"name":"a"}]}"#)).unwrap();

    assert_eq!(page.results[0].name.as_deref(), Some("b"));
    assert_eq!(page.results[1].name.as_deref(), Some("a"));
  }

  #[test]
  fn test_error_envelope_message_is_used() {
    let err = resolve_object::<Pool>(&raw(404, r#"{"code":404,"message":"object not found"}"#)).unwrap_err();

    match err {
      ClientError::Api(api) => {
        assert_eq!(api.kind, ApiErrorKind::NotFound);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "object not found");
      }
      other => panic!("expected ApiError, got {other}"),
    }
  }

  #[test]
  fn test_non_envelope_body_becomes_message() {
    let err = resolve_object::<Pool>(&raw(502, "upstream connect failure")).unwrap_err();

    match err {
      ClientError::Api(api) => {
        assert_eq!(api.kind, ApiErrorKind::ServerError);
        assert_eq!(api.message, "upstream connect failure");
      }
      other => panic!("expected ApiError, got {other}"),
    }
  }

  #[test]
  fn test_empty_error_body_falls_back_to_status_text() {
    let err = resolve_empty(&raw(401, "")).unwrap_err();

    match err {
      ClientError::Api(api) => {
        assert_eq!(api.kind, ApiErrorKind::Unauthorized);
        assert_eq!(api.message, "Unauthorized");
      }
      other => panic!("expected ApiError, got {other}"),
    }
  }

  #[test]
  fn test_malformed_success_body_is_decode_error() {
    let err = resolve_object::<Pool>(&raw(200, "<html>not json</html>")).unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
  }

  #[test]
  fn test_resolve_empty_accepts_no_content() {
    assert!(resolve_empty(&raw(204, "")).is_ok());
  }
}
