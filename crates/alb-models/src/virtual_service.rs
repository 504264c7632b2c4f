use serde::{Deserialize, Serialize};

use crate::{ConfigPbAttributes, resource::ApiResource};

/// A virtual service: the client-facing entity tying a VIP, listener
/// services, and back-end pools together.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualService {
  /// UNIX time since epoch in microseconds. Units(MICROSECONDS).
  #[serde(rename = "_last_modified")]
  pub last_modified: Option<String>,

  /// Keep advertising Virtual Service via BGP even if it is marked down by
  /// health monitor.
  pub advertise_down_vs: Option<bool>,

  /// Determines analytics settings for the application.
  pub analytics_policy: Option<AnalyticsPolicy>,

  /// Specifies settings related to analytics. It is a reference to an
  /// object of type AnalyticsProfile.
  pub analytics_profile_ref: Option<String>,

  /// Enable application layer specific features for the Virtual Service. It
  /// is a reference to an object of type ApplicationProfile.
  pub application_profile_ref: Option<String>,

  /// Checksum of cloud configuration for VS. Internally set by cloud
  /// connector.
  pub cloud_config_cksum: Option<String>,

  /// It is a reference to an object of type Cloud.
  pub cloud_ref: Option<String>,

  /// Enum options - CLOUD_NONE, CLOUD_VCENTER, CLOUD_OPENSTACK, CLOUD_AWS,
  /// CLOUD_LINUXSERVER, CLOUD_AZURE, CLOUD_GCP, CLOUD_NSXT.
  pub cloud_type: Option<String>,

  pub configpb_attributes: Option<ConfigPbAttributes>,

  /// Creator name.
  pub created_by: Option<String>,

  /// User defined description for the object.
  pub description: Option<String>,

  /// Response traffic to clients will be sent back to the source MAC
  /// address of the connection, rather than statically sent to a default
  /// gateway.
  pub enable_autogw: Option<bool>,

  /// Enable Route Health Injection using the BGP Config in the VRF Context.
  pub enable_rhi: Option<bool>,

  /// Enable or disable the Virtual Service.
  pub enabled: Option<bool>,

  /// Error Page Profile to be used for this virtualservice. It is a
  /// reference to an object of type ErrorPageProfile.
  pub error_page_profile_ref: Option<String>,

  /// DNS resolvable, fully qualified domain name of the virtualservice.
  pub fqdn: Option<String>,

  /// Ignore Pool servers network reachability constraints for Virtual
  /// Service placement.
  pub ign_pool_net_reach: Option<bool>,

  /// Name for the Virtual Service.
  pub name: Option<String>,

  /// Criteria for flow distribution among SEs. Enum options -
  /// LOAD_AWARE, CONSISTENT_HASH_SOURCE_IP_ADDRESS,
  /// CONSISTENT_HASH_SOURCE_IP_ADDRESS_AND_PORT.
  pub flow_dist: Option<String>,

  /// The pool group is an object that contains pools. It is a reference to
  /// an object of type PoolGroup.
  pub pool_group_ref: Option<String>,

  /// The pool is an object that contains destination servers and related
  /// attributes such as load-balancing and persistence. It is a reference
  /// to an object of type Pool.
  pub pool_ref: Option<String>,

  /// Remove listening port if VirtualService is down.
  pub remove_listening_port_on_vs_down: Option<bool>,

  /// The Service Engine Group to use for this Virtual Service. Moving to a
  /// new SE Group is disruptive to existing connections for this VS. It is
  /// a reference to an object of type ServiceEngineGroup.
  pub se_group_ref: Option<String>,

  /// List of Services defined for this Virtual Service.
  pub services: Option<Vec<Service>>,

  /// It is a reference to an object of type Tenant.
  pub tenant_ref: Option<String>,

  /// Server network or list of servers for cloning traffic. It is a
  /// reference to an object of type TrafficCloneProfile.
  pub traffic_clone_profile_ref: Option<String>,

  /// URL of this object.
  pub url: Option<String>,

  pub uuid: Option<String>,

  /// Mostly used during the creation of Shared VS, this field refers to
  /// entities that can be shared across Virtual Services. It is a reference
  /// to an object of type VsVip.
  pub vsvip_ref: Option<String>,
}

impl ApiResource for VirtualService {
  const NAME: &'static str = "virtualservice";
  const REQUIRED_FIELDS: &'static [&'static str] = &["name"];

  fn uuid(&self) -> Option<&str> {
    self.uuid.as_deref()
  }

  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

/// Determines analytics settings for the application.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsPolicy {
  /// Log all headers.
  pub all_headers: Option<bool>,

  /// Gain insights from sampled client to server HTTP requests and
  /// responses. Enum options - NO_INSIGHTS, PASSIVE, ACTIVE.
  pub client_insights: Option<String>,

  /// Disable Analytics on this VirtualService.
  pub enabled: Option<bool>,

  /// Virtual Service (VS) metrics are processed only when this is enabled.
  pub metrics_realtime_update: Option<bool>,

  /// This setting limits the number of UDF logs generated per second for
  /// this VS on each SE. Allowed values are 0-1000000.
  pub udf_log_throttle: Option<u32>,
}

/// One listener port (or port range) of a virtual service.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
  /// Enable SSL termination and offload for traffic from clients.
  pub enable_ssl: Option<bool>,

  /// The Virtual Service's port number. Allowed values are 0-65535.
  pub port: Option<i32>,

  /// The end of the Virtual Service's port number range. Allowed values are
  /// 1-65535.
  pub port_range_end: Option<i32>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reference_fields_stay_plain_strings() {
    let json = r#"{
      "name": "vs-web",
      "pool_ref": "https://ctrl/api/pool/pool-9a1",
      "services": [{"port": 443, "enable_ssl": true}]
    }"#;
    let vs: VirtualService = serde_json::from_str(json).unwrap();

    assert_eq!(vs.pool_ref.as_deref(), Some("https://ctrl/api/pool/pool-9a1"));
    assert_eq!(vs.services.as_ref().unwrap()[0].port, Some(443));
  }
}
