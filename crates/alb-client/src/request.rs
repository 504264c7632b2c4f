//! Pure construction of transport-ready request descriptors.

use alb_models::ApiResource;
use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::{codec, error::BuildError};

const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn encode_path_segment(segment: &str) -> String {
  utf8_percent_encode(segment, PATH_ENCODE_SET).to_string()
}

fn encode_query_component(component: &str) -> String {
  utf8_percent_encode(component, QUERY_ENCODE_SET).to_string()
}

/// Partial-update operation tokens accepted by the controller's PATCH
/// endpoints. The token becomes the single top-level key of the PATCH body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PatchOp {
  Add,
  Replace,
  Delete,
}

/// A transport-ready request: everything the session needs except the base
/// URL and session-scoped headers.
///
/// `path` is stored already percent-encoded and without a leading slash;
/// query values are stored raw and encoded at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
  pub method: Method,
  pub path: String,
  pub query: Vec<(String, String)>,
  pub body: Option<Vec<u8>>,
  /// Whether the session may retry this request on transient failure
  /// without an explicit opt-in from the caller.
  pub idempotent: bool,
}

impl RequestDescriptor {
  fn new(method: Method, path: String) -> Self {
    let idempotent =
      method == Method::GET || method == Method::PUT || method == Method::DELETE || method == Method::HEAD;
    Self {
      method,
      path,
      query: Vec::new(),
      body: None,
      idempotent,
    }
  }

  /// Render the path plus query string, relative to the session base URL.
  #[must_use]
  pub fn render_path_and_query(&self) -> String {
    if self.query.is_empty() {
      return self.path.clone();
    }
    let query = self
      .query
      .iter()
      .map(|(key, value)| format!("{}={}", encode_query_component(key), encode_query_component(value)))
      .collect::<Vec<_>>()
      .join("&");
    format!("{}?{}", self.path, query)
  }
}

/// Query-string vocabulary understood by the controller's collection
/// endpoints. Repeated keys are supported through [`FilterParams::param`].
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
  name: Option<String>,
  cloud: Option<String>,
  cloud_uuid: Option<String>,
  include_name: bool,
  skip_default: bool,
  page_size: Option<u32>,
  extra: Vec<(String, String)>,
}

impl FilterParams {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Filter by exact object name.
  #[must_use]
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Filter by cloud name. Ignored when a cloud uuid filter is also set.
  #[must_use]
  pub fn cloud(mut self, cloud: impl Into<String>) -> Self {
    self.cloud = Some(cloud.into());
    self
  }

  /// Filter by cloud uuid (`cloud_ref.uuid`).
  #[must_use]
  pub fn cloud_uuid(mut self, uuid: impl Into<String>) -> Self {
    self.cloud_uuid = Some(uuid.into());
    self
  }

  /// Ask the controller to append `#<name>` to every reference URL in the
  /// response.
  #[must_use]
  pub fn include_name(mut self) -> Self {
    self.include_name = true;
    self
  }

  /// Exclude system-default objects from the listing.
  #[must_use]
  pub fn skip_default(mut self) -> Self {
    self.skip_default = true;
    self
  }

  /// Objects per page.
  #[must_use]
  pub fn page_size(mut self, size: u32) -> Self {
    self.page_size = Some(size);
    self
  }

  /// Append an arbitrary query parameter. May be called repeatedly with the
  /// same key; each call emits one `key=value` pair.
  #[must_use]
  pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.extra.push((key.into(), value.into()));
    self
  }

  fn to_query(&self) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if let Some(name) = &self.name {
      query.push(("name".to_string(), name.clone()));
    }
    if let Some(cloud) = &self.cloud {
      query.push(("cloud".to_string(), cloud.clone()));
    } else if let Some(uuid) = &self.cloud_uuid {
      query.push(("cloud_ref.uuid".to_string(), uuid.clone()));
    }
    if self.include_name {
      query.push(("include_name".to_string(), "true".to_string()));
    }
    if self.skip_default {
      query.push(("skip_default".to_string(), "true".to_string()));
    }
    if let Some(size) = self.page_size {
      query.push(("page_size".to_string(), size.to_string()));
    }
    query.extend(self.extra.iter().cloned());
    query
  }
}

fn collection_path<T: ApiResource>() -> String {
  format!("api/{}", T::NAME)
}

fn object_path<T: ApiResource>(uuid: &str) -> String {
  format!("api/{}/{}", T::NAME, encode_path_segment(uuid))
}

/// GET the resource collection, filtered.
#[must_use]
pub fn list<T: ApiResource>(filter: &FilterParams) -> RequestDescriptor {
  let mut descriptor = RequestDescriptor::new(Method::GET, collection_path::<T>());
  descriptor.query = filter.to_query();
  descriptor
}

/// GET a single object by uuid.
#[must_use]
pub fn get<T: ApiResource>(uuid: &str, filter: &FilterParams) -> RequestDescriptor {
  let mut descriptor = RequestDescriptor::new(Method::GET, object_path::<T>(uuid));
  descriptor.query = filter.to_query();
  descriptor
}

/// POST a new object. The payload must carry every always-required field.
pub fn create<T>(instance: &T) -> Result<RequestDescriptor, BuildError>
where
  T: ApiResource + Serialize,
{
  let body = codec::encode(instance)?;
  let mut descriptor = RequestDescriptor::new(Method::POST, collection_path::<T>());
  descriptor.body = Some(body);
  Ok(descriptor)
}

/// PUT a full replacement of the object identified by its own uuid.
pub fn update<T>(instance: &T) -> Result<RequestDescriptor, BuildError>
where
  T: ApiResource + Serialize,
{
  let uuid = instance.uuid().ok_or(BuildError::MissingUuid)?;
  let body = codec::encode(instance)?;
  let mut descriptor = RequestDescriptor::new(Method::PUT, object_path::<T>(uuid));
  descriptor.body = Some(body);
  Ok(descriptor)
}

/// PATCH an object with a partial payload wrapped in the controller's
/// `{"<op>": ...}` envelope. The partial instance is exempt from the
/// required-field check.
pub fn patch<T, P>(uuid: &str, op: PatchOp, partial: &P) -> Result<RequestDescriptor, BuildError>
where
  T: ApiResource,
  P: Serialize,
{
  let inner = serde_json::to_value(partial).map_err(crate::error::EncodeError::from)?;
  let mut envelope = serde_json::Map::new();
  envelope.insert(op.to_string(), inner);
  let body = serde_json::to_vec(&envelope).map_err(crate::error::EncodeError::from)?;

  let mut descriptor = RequestDescriptor::new(Method::PATCH, object_path::<T>(uuid));
  descriptor.body = Some(body);
  Ok(descriptor)
}

/// DELETE an object by uuid.
#[must_use]
pub fn delete<T: ApiResource>(uuid: &str) -> RequestDescriptor {
  RequestDescriptor::new(Method::DELETE, object_path::<T>(uuid))
}
