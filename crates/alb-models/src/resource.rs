/// Registry contract implemented by every top-level, API-addressable
/// resource model.
///
/// Sub-objects (embedded compositions such as [`crate::Vip`] or
/// [`crate::Server`]) do not implement this trait; they are only reachable
/// through their owning resource.
pub trait ApiResource {
  /// Wire name of the resource, as it appears in the collection endpoint
  /// path (`api/<NAME>`) and in object URLs.
  const NAME: &'static str;

  /// Wire keys that must be present when the instance is encoded as a
  /// create or full-update payload. Partial (PATCH) payloads are exempt.
  const REQUIRED_FIELDS: &'static [&'static str];

  /// Server-assigned identifier, if the instance has been through the
  /// controller at least once. Freshly built request payloads return `None`.
  fn uuid(&self) -> Option<&str>;

  /// Configured object name, if set.
  fn name(&self) -> Option<&str>;
}
