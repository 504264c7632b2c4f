use serde::{Deserialize, Serialize};

use crate::{ConfigPbAttributes, Vip, resource::ApiResource};

/// Shareable VIP object, referenced by virtual services.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VsVip {
  /// UNIX time since epoch in microseconds. Units(MICROSECONDS).
  #[serde(rename = "_last_modified")]
  pub last_modified: Option<String>,

  /// BGP peer labels that enable selective advertisement of this VsVip to
  /// specific peers.
  pub bgp_peer_labels: Option<Vec<String>>,

  /// It is a reference to an object of type Cloud.
  pub cloud_ref: Option<String>,

  pub configpb_attributes: Option<ConfigPbAttributes>,

  /// Service discovery specific data including fully qualified domain name,
  /// type and Time-To-Live of the DNS record.
  pub dns_info: Option<Vec<DnsInfo>>,

  /// Force placement on all Service Engines in the Service Engine Group
  /// (Container clouds only).
  pub east_west_placement: Option<bool>,

  /// Name for the VsVip object.
  pub name: Option<String>,

  /// It is a reference to an object of type Tenant.
  pub tenant_ref: Option<String>,

  /// This overrides the cloud level default and needs to match the SE Group
  /// value in which it will be used if the SE Group use_standard_alb value
  /// is set.
  pub use_standard_alb: Option<bool>,

  /// URL of this object.
  pub url: Option<String>,

  pub uuid: Option<String>,

  /// List of Virtual Service IPs and other shareable entities.
  pub vip: Option<Vec<Vip>>,

  /// Virtual Routing Context that the VsVip is bound to. It is a reference
  /// to an object of type VrfContext.
  pub vrf_context_ref: Option<String>,

  /// Checksum of cloud configuration for VsVip. Internally set by cloud
  /// connector.
  pub vsvip_cloud_config_cksum: Option<String>,
}

impl ApiResource for VsVip {
  const NAME: &'static str = "vsvip";
  const REQUIRED_FIELDS: &'static [&'static str] = &["name"];

  fn uuid(&self) -> Option<&str> {
    self.uuid.as_deref()
  }

  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

/// DNS record details for a VIP.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsInfo {
  /// Fully qualified domain name.
  pub fqdn: Option<String>,

  /// Time to live for FQDN record. Unit is SEC.
  pub ttl: Option<u32>,

  /// DNS record type. Enum options - DNS_RECORD_OTHER, DNS_RECORD_A,
  /// DNS_RECORD_AAAA, DNS_RECORD_CNAME, DNS_RECORD_NS, DNS_RECORD_SRV.
  #[serde(rename = "type")]
  pub record_type: Option<String>,
}
