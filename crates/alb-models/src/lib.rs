//! Data-transfer models for the ALB controller REST API.
//!
//! Every model field is optional: `None` means the field was absent on the
//! wire (or should be omitted from a request payload), which is distinct from
//! a zero value. The controller's API is partial-update oriented, so omitted
//! fields must never overwrite server-side state. Fields ending in `_ref`
//! hold the URL of another configuration object; they are lookup keys, not
//! owned sub-objects.
//!
//! Enum-valued string fields are deliberately left as plain strings. The set
//! of allowed tokens grows with controller releases, and the client must not
//! reject a value it does not recognize.

mod collection;
mod config_pb_attributes;
mod health_monitor;
mod ip_addr;
mod pool;
mod pool_group;
mod resource;
mod server;
mod timestamp;
mod vip;
mod virtual_service;
mod vs_vip;

pub use collection::{ApiResult, Collection};
pub use config_pb_attributes::ConfigPbAttributes;
pub use health_monitor::{HealthMonitor, HealthMonitorHttp, HealthMonitorTcp, HealthMonitorUdp};
pub use ip_addr::{IpAddr, IpAddrPrefix};
pub use pool::{FailAction, PlacementNetwork, Pool, PoolAnalyticsPolicy};
pub use pool_group::{PoolGroup, PoolGroupMember};
pub use resource::ApiResource;
pub use server::Server;
pub use timestamp::TimeStamp;
pub use vip::{Vip, VipPlacementNetwork, VipRuntime};
pub use virtual_service::{AnalyticsPolicy, Service, VirtualService};
pub use vs_vip::{DnsInfo, VsVip};
