use serde::{Deserialize, Serialize};

use crate::{ConfigPbAttributes, IpAddrPrefix, Server, resource::ApiResource};

/// A pool of back-end servers sharing a load-balancing policy and health
/// monitoring configuration.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
  /// UNIX time since epoch in microseconds. Units(MICROSECONDS).
  #[serde(rename = "_last_modified")]
  pub last_modified: Option<String>,

  /// Determines analytics settings for the pool.
  pub analytics_policy: Option<PoolAnalyticsPolicy>,

  /// Specifies settings related to analytics. It is a reference to an object
  /// of type AnalyticsProfile.
  pub analytics_profile_ref: Option<String>,

  /// Allows the option to append port to hostname in the host header while
  /// sending a request to the server. By default, port is appended for
  /// non-default ports. Enum options - NON_DEFAULT_80_443, NEVER, ALWAYS.
  pub append_port: Option<String>,

  /// Persistence will ensure the same user sticks to the same server for a
  /// desired duration of time. It is a reference to an object of type
  /// ApplicationPersistenceProfile.
  pub application_persistence_profile_ref: Option<String>,

  /// Inline estimation of capacity of servers.
  pub capacity_estimation: Option<bool>,

  /// Checksum of cloud configuration for Pool. Internally set by cloud
  /// connector.
  pub cloud_config_cksum: Option<String>,

  /// It is a reference to an object of type Cloud.
  pub cloud_ref: Option<String>,

  pub configpb_attributes: Option<ConfigPbAttributes>,

  /// Duration for which new connections will be gradually ramped up to a
  /// server recently brought online. Allowed values are 1-300. Special
  /// values are 0 - Immediate. Unit is MIN.
  pub connection_ramp_duration: Option<i32>,

  /// Creator name.
  pub created_by: Option<String>,

  /// Traffic sent to servers will use this destination server port unless
  /// overridden by the server's specific port attribute. Allowed values are
  /// 1-65535.
  pub default_server_port: Option<i32>,

  /// A description of the pool.
  pub description: Option<String>,

  /// Comma separated list of domain names which will be used to verify the
  /// common names or subject alternative names presented by server
  /// certificates.
  pub domain_name: Option<Vec<String>>,

  /// Enable or disable the pool. Disabling will terminate all open
  /// connections and pause health monitors.
  pub enabled: Option<bool>,

  /// Enable an action - Close Connection, HTTP Redirect or Local HTTP
  /// Response - when a pool failure happens.
  pub fail_action: Option<FailAction>,

  /// Used to gracefully disable a server. Virtual service waits for the
  /// specified time before terminating the existing connections to the
  /// servers that are disabled. Allowed values are 1-7200. Special values
  /// are 0 - Immediate, -1 - Infinite. Unit is MIN.
  pub graceful_disable_timeout: Option<i32>,

  /// Verify server health by applying one or more health monitors. Active
  /// monitors generate synthetic traffic from each Service Engine and mark
  /// a server up or down based on the response. It is a reference to an
  /// object of type HealthMonitor. Maximum of 50 items allowed.
  pub health_monitor_refs: Option<Vec<String>>,

  /// The Passive monitor will monitor client to server connections and
  /// requests and adjust traffic load to servers based on successful
  /// responses.
  pub inline_health_monitor: Option<bool>,

  /// The load balancing algorithm will pick a server within the pool's list
  /// of available servers. Enum options - LB_ALGORITHM_LEAST_CONNECTIONS,
  /// LB_ALGORITHM_ROUND_ROBIN, LB_ALGORITHM_FASTEST_RESPONSE,
  /// LB_ALGORITHM_CONSISTENT_HASH, LB_ALGORITHM_LEAST_LOAD,
  /// LB_ALGORITHM_FEWEST_SERVERS, LB_ALGORITHM_RANDOM.
  pub lb_algorithm: Option<String>,

  /// HTTP header name to be used for the hash key.
  pub lb_algorithm_consistent_hash_hdr: Option<String>,

  /// The maximum number of concurrent connections allowed to each server
  /// within the pool. If set to 0, no limit is applied.
  pub max_concurrent_connections_per_server: Option<i32>,

  /// Minimum number of servers in UP state for marking the pool UP.
  pub min_servers_up: Option<u32>,

  /// The name of the pool.
  pub name: Option<String>,

  /// (internal-use) Networks designated as containing servers for this
  /// pool. The servers may be further narrowed down by a filter.
  pub networks: Option<Vec<PlacementNetwork>>,

  /// Avi will validate the SSL certificate present by a server against the
  /// selected PKI Profile. It is a reference to an object of type
  /// PKIProfile.
  pub pki_profile_ref: Option<String>,

  /// The list of servers in this pool.
  pub servers: Option<Vec<Server>>,

  /// Server SSL profile. It is a reference to an object of type SSLProfile.
  pub ssl_profile_ref: Option<String>,

  /// It is a reference to an object of type Tenant.
  pub tenant_ref: Option<String>,

  /// URL of this object.
  pub url: Option<String>,

  pub uuid: Option<String>,

  /// Virtual Routing Context that the pool is bound to. It is a reference
  /// to an object of type VrfContext.
  pub vrf_ref: Option<String>,
}

impl ApiResource for Pool {
  const NAME: &'static str = "pool";
  const REQUIRED_FIELDS: &'static [&'static str] = &["name"];

  fn uuid(&self) -> Option<&str> {
    self.uuid.as_deref()
  }

  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

/// Analytics settings scoped to a single pool.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolAnalyticsPolicy {
  /// Enable real-time metrics for server and pool metrics.
  pub enable_realtime_metrics: Option<bool>,
}

/// Action to take when the pool experiences a failure.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailAction {
  /// Enum options - FAIL_ACTION_HTTP_REDIRECT, FAIL_ACTION_HTTP_LOCAL_RSP,
  /// FAIL_ACTION_CLOSE_CONN, FAIL_ACTION_BACKUP_POOL.
  #[serde(rename = "type")]
  pub action_type: Option<String>,
}

/// Network and subnet filter used for server placement.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementNetwork {
  /// It is a reference to an object of type Network.
  pub network_ref: Option<String>,

  pub subnet: Option<IpAddrPrefix>,
}
