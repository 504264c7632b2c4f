use http::StatusCode;

/// Failure while turning wire bytes into a typed model.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  /// The payload is not valid JSON at all.
  #[error("malformed JSON payload: {detail}")]
  Malformed { detail: String },

  /// The payload is valid JSON but a field's wire type conflicts with the
  /// declared model type. `path` locates the offending field.
  #[error("type mismatch at {path}: {detail}")]
  TypeMismatch { path: String, detail: String },
}

/// Failure while turning a typed model into wire bytes.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
  /// A field the resource marks as always-required is absent.
  #[error("required field `{field}` is absent")]
  MissingRequired { field: &'static str },

  /// The serializer itself refused the value.
  #[error("serialization failed: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Failure while assembling a request descriptor.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
  /// The request payload could not be encoded.
  #[error("invalid request payload: {0}")]
  InvalidPayload(#[from] EncodeError),

  /// A full update needs the server-assigned uuid, and the instance has
  /// none.
  #[error("instance has no uuid; only objects read back from the controller can be updated")]
  MissingUuid,
}

/// Failure in the transport layer, before any HTTP status was obtained.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  #[error("request timed out")]
  Timeout,

  #[error("request cancelled")]
  Cancelled,

  #[error("connection failed: {detail}")]
  ConnectionFailed { detail: String },
}

impl TransportError {
  /// Transient failures may be retried per the session policy; a
  /// cancellation is a caller decision and never is.
  #[must_use]
  pub fn is_transient(&self) -> bool {
    matches!(self, Self::Timeout | Self::ConnectionFailed { .. })
  }
}

/// Broad classification of a non-2xx controller response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ApiErrorKind {
  BadRequest,
  Unauthorized,
  NotFound,
  Conflict,
  ServerError,
  Unknown,
}

impl ApiErrorKind {
  #[must_use]
  pub fn from_status(status: StatusCode) -> Self {
    match status.as_u16() {
      400 => Self::BadRequest,
      401 | 403 => Self::Unauthorized,
      404 => Self::NotFound,
      409 => Self::Conflict,
      500..=599 => Self::ServerError,
      _ => Self::Unknown,
    }
  }
}

/// A non-2xx response from the controller, with the decoded error envelope
/// message when one was present.
#[derive(Debug, thiserror::Error)]
#[error("HTTP {status} ({kind}): {message}")]
pub struct ApiError {
  pub kind: ApiErrorKind,
  pub status: StatusCode,
  pub message: String,
}

/// Top-level error type returned by every client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
  #[error(transparent)]
  Decode(#[from] DecodeError),

  #[error(transparent)]
  Encode(#[from] EncodeError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(transparent)]
  Transport(#[from] TransportError),

  #[error(transparent)]
  Api(#[from] ApiError),

  /// Session construction failed (bad host, TLS setup).
  #[error("invalid session configuration: {detail}")]
  Config { detail: String },

  /// A by-name lookup matched nothing.
  #[error("no object of type {resource} with name `{name}` found")]
  NotFoundByName { resource: &'static str, name: String },

  /// A by-name lookup matched more than one object.
  #[error("more than one object of type {resource} with name `{name}` found")]
  AmbiguousName { resource: &'static str, name: String },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_kind_from_status() {
    assert_eq!(ApiErrorKind::from_status(StatusCode::BAD_REQUEST), ApiErrorKind::BadRequest);
    assert_eq!(ApiErrorKind::from_status(StatusCode::UNAUTHORIZED), ApiErrorKind::Unauthorized);
    assert_eq!(ApiErrorKind::from_status(StatusCode::FORBIDDEN), ApiErrorKind::Unauthorized);
    assert_eq!(ApiErrorKind::from_status(StatusCode::NOT_FOUND), ApiErrorKind::NotFound);
    assert_eq!(ApiErrorKind::from_status(StatusCode::CONFLICT), ApiErrorKind::Conflict);
    assert_eq!(
      ApiErrorKind::from_status(StatusCode::SERVICE_UNAVAILABLE),
      ApiErrorKind::ServerError
    );
    assert_eq!(
      ApiErrorKind::from_status(StatusCode::IM_A_TEAPOT),
      ApiErrorKind::Unknown
    );
  }

  #[test]
  fn test_cancelled_is_not_transient() {
    assert!(TransportError::Timeout.is_transient());
    assert!(
      TransportError::ConnectionFailed {
        detail: "refused".to_string()
      }
      .is_transient()
    );
    assert!(!TransportError::Cancelled.is_transient());
  }
}
