use serde::{Deserialize, Serialize};

use crate::{ConfigPbAttributes, resource::ApiResource};

/// A group of pools with relative priorities and traffic ratios, addressed
/// by virtual services as a single target.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolGroup {
  /// UNIX time since epoch in microseconds. Units(MICROSECONDS).
  #[serde(rename = "_last_modified")]
  pub last_modified: Option<String>,

  /// Checksum of cloud configuration for PoolGroup. Internally set by cloud
  /// connector.
  pub cloud_config_cksum: Option<String>,

  /// It is a reference to an object of type Cloud.
  pub cloud_ref: Option<String>,

  pub configpb_attributes: Option<ConfigPbAttributes>,

  /// Name of the user who created the object.
  pub created_by: Option<String>,

  /// When setup autoscale manager will automatically promote new pools into
  /// production when deployment goals are met. It is a reference to an
  /// object of type PoolGroupDeploymentPolicy.
  pub deployment_policy_ref: Option<String>,

  /// Description of Pool Group.
  pub description: Option<String>,

  /// Enable an action - Close Connection, HTTP Redirect, or Local HTTP
  /// Response - when a pool group failure happens.
  pub fail_action: Option<crate::FailAction>,

  /// Whether an implicit set of priority labels is generated.
  pub implicit_priority_labels: Option<bool>,

  /// List of pool group members object of type PoolGroupMember.
  pub members: Option<Vec<PoolGroupMember>>,

  /// The minimum number of servers to distribute traffic to. Allowed values
  /// are 1-65535. Special values are 0 - Disable.
  pub min_servers: Option<u32>,

  /// The name of the pool group.
  pub name: Option<String>,

  /// UUID of the priority labels. If not provided, pool group member
  /// priority label will be interpreted as a number with a larger number
  /// considered higher priority. It is a reference to an object of type
  /// PriorityLabels.
  pub priority_labels_ref: Option<String>,

  /// It is a reference to an object of type Tenant.
  pub tenant_ref: Option<String>,

  /// URL of this object.
  pub url: Option<String>,

  pub uuid: Option<String>,
}

impl ApiResource for PoolGroup {
  const NAME: &'static str = "poolgroup";
  const REQUIRED_FIELDS: &'static [&'static str] = &["name"];

  fn uuid(&self) -> Option<&str> {
    self.uuid.as_deref()
  }

  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

/// One pool's membership in a pool group.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolGroupMember {
  /// Pool deployment state used with the PG deployment policy. Enum options
  /// - EVALUATION_IN_PROGRESS, IN_SERVICE, OUT_OF_SERVICE,
  /// EVALUATION_FAILED.
  pub deployment_state: Option<String>,

  /// UUID of the pool. It is a reference to an object of type Pool.
  pub pool_ref: Option<String>,

  /// All pools with same label are treated similarly in a pool group. A
  /// pool with a higher priority is selected, as long as the pool is
  /// eligible or an explicit policy chooses a different pool.
  pub priority_label: Option<String>,

  /// Ratio of selecting eligible pools in the pool group. Allowed values
  /// are 1-1000. Special values are 0 - Do not select this pool for new
  /// connections.
  pub ratio: Option<u32>,
}
