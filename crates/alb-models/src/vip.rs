use serde::{Deserialize, Serialize};

use crate::{IpAddr, IpAddrPrefix, TimeStamp};

/// A single virtual IP, embedded in a [`crate::VsVip`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vip {
  /// Auto-allocate floating/elastic IP from the Cloud infrastructure.
  pub auto_allocate_floating_ip: Option<bool>,

  /// Auto-allocate VIP from the provided subnet.
  pub auto_allocate_ip: Option<bool>,

  /// Specifies whether to auto-allocate only a V4 address, only a V6
  /// address, or one of each type. Enum options - V4_ONLY, V6_ONLY,
  /// V4_V6.
  pub auto_allocate_ip_type: Option<String>,

  /// Availability-zone to place the Virtual Service.
  pub availability_zone: Option<String>,

  /// (internal-use) FIP allocated by Avi in the Cloud infrastructure.
  pub avi_allocated_fip: Option<bool>,

  /// (internal-use) VIP allocated by Avi in the Cloud infrastructure.
  pub avi_allocated_vip: Option<bool>,

  /// Enable or disable the VIP.
  pub enabled: Option<bool>,

  /// Floating IPv4 to associate with this VIP.
  pub floating_ip: Option<IpAddr>,

  /// IPv6 address of the VIP.
  pub ip6_address: Option<IpAddr>,

  /// IPv4 address of the VIP.
  pub ip_address: Option<IpAddr>,

  /// Manually override the network on which the VIP is placed. It is a
  /// reference to an object of type Network.
  pub network_ref: Option<String>,

  /// Placement networks/subnets to use for VIP placement.
  pub placement_networks: Option<Vec<VipPlacementNetwork>>,

  /// (internal-use) Network port assigned to the VIP IP address.
  pub port_uuid: Option<String>,

  /// Subnet providing reachability for client facing VIP IP.
  pub subnet: Option<IpAddrPrefix>,

  /// If auto_allocate_ip is True, then the subnet for the VIP IP is
  /// auto-allocated from the provided subnet uuid. It is a reference to an
  /// object of type Subnet.
  pub subnet_uuid: Option<String>,

  /// Unique ID associated with the VIP.
  pub vip_id: Option<String>,
}

/// Placement and migration state of one VIP, reported by the controller.
/// Read-only runtime data; never part of a request payload.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VipRuntime {
  /// When the VIP was first assigned to a Service Engine.
  pub first_se_assigned_time: Option<TimeStamp>,

  pub first_time_placement: Option<bool>,

  pub fsm_state_id: Option<String>,

  pub fsm_state_name: Option<String>,

  /// Last transition of the VIP's placement state machine.
  pub last_changed_time: Option<TimeStamp>,

  pub marked_for_delete: Option<bool>,

  pub migrate_in_progress: Option<bool>,

  pub migrate_scalein_pending: Option<bool>,

  pub migrate_scaleout_pending: Option<bool>,

  pub num_additional_se: Option<i32>,

  pub progress_percent: Option<i32>,

  pub scalein_in_progress: Option<bool>,

  pub scaleout_in_progress: Option<bool>,

  pub user_scaleout_pending: Option<bool>,

  /// Unique ID of the VIP this runtime describes.
  pub vip_id: Option<String>,

  pub warmstart_resync_done: Option<bool>,

  pub warmstart_resync_sent: Option<bool>,
}

/// One candidate network/subnet pair for VIP placement.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VipPlacementNetwork {
  /// It is a reference to an object of type Network.
  pub network_ref: Option<String>,

  /// IPv4 subnet to use for placement.
  pub subnet: Option<IpAddrPrefix>,

  /// IPv6 subnet to use for placement.
  pub subnet6: Option<IpAddrPrefix>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_runtime_timestamps_decode_as_second_microsecond_pairs() {
    let json = r#"{
      "vip_id": "0",
      "first_se_assigned_time": {"secs": 1700000000, "usecs": 125000},
      "migrate_in_progress": false
    }"#;
    let runtime: VipRuntime = serde_json::from_str(json).unwrap();
    let assigned = runtime.first_se_assigned_time.unwrap();

    assert_eq!(assigned.secs, Some(1_700_000_000));
    assert_eq!(assigned.to_datetime().unwrap().timestamp_subsec_micros(), 125_000);
    assert!(runtime.last_changed_time.is_none());
  }
}
