use serde::{Deserialize, Serialize};

/// Protobuf versioning attributes carried on configuration objects.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPbAttributes {
  /// Protobuf version number. Gets incremented when there is a change in
  /// the protobuf or the internal representation of the object.
  pub version: Option<u32>,
}
