use serde::{Deserialize, Serialize};

use crate::IpAddr;

/// A single back-end server inside a [`crate::Pool`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
  /// Name of autoscaling group this server belongs to.
  pub autoscaling_group_name: Option<String>,

  /// A description of the server.
  pub description: Option<String>,

  /// Enable, Disable or Graceful Disable determine if new or existing
  /// connections to the server are allowed.
  pub enabled: Option<bool>,

  /// UID of server in external orchestration systems.
  pub external_uuid: Option<String>,

  /// DNS resolvable name of the server. May be used in place of the IP
  /// address.
  pub hostname: Option<String>,

  /// IP Address of the server. Required if there is no resolvable host name.
  pub ip: Option<IpAddr>,

  /// (internal-use) Geographic location of the server. Currently only for
  /// internal usage.
  pub location: Option<String>,

  /// MAC address of server.
  pub mac_address: Option<String>,

  /// (internal-use) This field is used internally by Avi, not editable by
  /// the user. It is a reference to an object of type VIMgrNWRuntime.
  pub nw_ref: Option<String>,

  /// Optionally specify the servers port number. This will override the
  /// pool's default server port attribute. Allowed values are 1-65535.
  /// Special values are 0 - use backend port in pool.
  pub port: Option<i32>,

  /// Header value for custom header persistence.
  pub prst_hdr_val: Option<String>,

  /// Ratio of selecting eligible servers in the pool. Allowed values are
  /// 1-20.
  pub ratio: Option<u32>,

  /// Auto resolve server's IP using DNS name.
  pub resolve_server_by_dns: Option<bool>,

  /// Rewrite incoming Host Header to server name.
  pub rewrite_host_header: Option<bool>,

  /// If statically learned.
  #[serde(rename = "static")]
  pub static_: Option<bool>,

  /// Verify server belongs to a discovered network or reachable via a
  /// discovered network. Verify reachable network isn't the OpenStack
  /// management network.
  pub verify_network: Option<bool>,

  /// (internal-use) This field is used internally by Avi, not editable by
  /// the user. It is a reference to an object of type VIMgrVMRuntime.
  pub vm_ref: Option<String>,
}
