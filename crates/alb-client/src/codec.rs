//! Pure transforms between wire JSON and typed model instances.
//!
//! Unknown wire fields are ignored on decode and absent fields are omitted
//! on encode; both directions preserve the absent-vs-zero distinction the
//! partial-update protocol depends on.

use alb_models::ApiResource;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::error::Category;

use crate::error::{DecodeError, EncodeError};

/// Decode a wire payload into `T`.
///
/// Syntactically invalid JSON yields [`DecodeError::Malformed`]; valid JSON
/// whose field types conflict with the model yields
/// [`DecodeError::TypeMismatch`] with the JSON path of the offending field.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
  let mut de = serde_json::Deserializer::from_slice(bytes);
  serde_path_to_error::deserialize(&mut de).map_err(|err| {
    let path = err.path().to_string();
    let inner = err.into_inner();
    match inner.classify() {
      Category::Data => DecodeError::TypeMismatch {
        path,
        detail: inner.to_string(),
      },
      Category::Syntax | Category::Eof | Category::Io => DecodeError::Malformed {
        detail: inner.to_string(),
      },
    }
  })
}

/// Encode a create/full-update payload, enforcing the resource's
/// always-required fields.
pub fn encode<T>(instance: &T) -> Result<Vec<u8>, EncodeError>
where
  T: ApiResource + Serialize,
{
  let value = serde_json::to_value(instance)?;
  if let Some(object) = value.as_object() {
    for field in T::REQUIRED_FIELDS {
      if !object.contains_key(*field) {
        return Err(EncodeError::MissingRequired { field });
      }
    }
  }
  Ok(serde_json::to_vec(&value)?)
}

/// Encode a partial payload without the required-field check. PATCH bodies
/// carry only the fields being changed.
pub fn encode_partial<T: Serialize>(instance: &T) -> Result<Vec<u8>, EncodeError> {
  Ok(serde_json::to_vec(instance)?)
}
