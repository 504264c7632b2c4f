use serde::{Deserialize, Serialize};

/// An IPv4 or IPv6 address with its address-family tag.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddr {
  /// IP address.
  pub addr: Option<String>,

  /// Enum options - V4, V6, DNS.
  #[serde(rename = "type")]
  pub addr_type: Option<String>,
}

/// An address plus prefix length, describing a subnet.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddrPrefix {
  pub ip_addr: Option<IpAddr>,
  pub mask: Option<i32>,
}

impl IpAddr {
  /// Shorthand for a V4 address literal.
  #[must_use]
  pub fn v4(addr: impl Into<String>) -> Self {
    Self {
      addr: Some(addr.into()),
      addr_type: Some("V4".to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_type_key_renamed_on_wire() {
    let addr = IpAddr::v4("10.10.10.1");
    let json = serde_json::to_value(&addr).unwrap();

    assert_eq!(json["addr"], "10.10.10.1");
    assert_eq!(json["type"], "V4");
  }
}
