use serde::{Deserialize, Serialize};

use crate::{ConfigPbAttributes, resource::ApiResource};

/// Active or passive health monitoring configuration, attached to pools by
/// reference.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMonitor {
  /// UNIX time since epoch in microseconds. Units(MICROSECONDS).
  #[serde(rename = "_last_modified")]
  pub last_modified: Option<String>,

  /// By default, multiple instances of the same healthmonitor to the same
  /// server are suppressed intelligently. In rare cases, the monitor may
  /// need to be run even though the server health status is already known.
  pub allow_duplicate_monitors: Option<bool>,

  pub configpb_attributes: Option<ConfigPbAttributes>,

  /// User defined description for the object.
  pub description: Option<String>,

  /// Number of continuous failed health checks before the server is marked
  /// down. Allowed values are 1-50.
  pub failed_checks: Option<i32>,

  /// Health monitor for HTTP.
  pub http_monitor: Option<HealthMonitorHttp>,

  /// Health monitor for HTTPS.
  pub https_monitor: Option<HealthMonitorHttp>,

  /// This field describes the object's replication scope. If the field is
  /// set to false, then the object is visible within the controller-cluster
  /// and its associated service-engines. If the field is set to true, then
  /// the object is replicated across the federation.
  pub is_federated: Option<bool>,

  /// Use this port instead of the port defined for the server in the Pool.
  /// If the monitor succeeds to this port, the load balanced traffic will
  /// still be sent to the port of the server defined within the Pool.
  /// Allowed values are 1-65535. Special values are 0 - Use server port.
  pub monitor_port: Option<i32>,

  /// A user friendly name for this health monitor.
  pub name: Option<String>,

  /// A valid response from the server is expected within the receive
  /// timeout window. This timeout must be less than the send interval.
  /// Allowed values are 1-2400. Unit is SEC.
  pub receive_timeout: Option<i32>,

  /// Frequency, in seconds, that monitors are sent to a server. Allowed
  /// values are 1-3600. Unit is SEC.
  pub send_interval: Option<i32>,

  /// Number of continuous successful health checks before server is marked
  /// up. Allowed values are 1-50.
  pub successful_checks: Option<i32>,

  /// Health monitor for TCP.
  pub tcp_monitor: Option<HealthMonitorTcp>,

  /// It is a reference to an object of type Tenant.
  pub tenant_ref: Option<String>,

  /// Type of the health monitor. Enum options - HEALTH_MONITOR_PING,
  /// HEALTH_MONITOR_TCP, HEALTH_MONITOR_HTTP, HEALTH_MONITOR_HTTPS,
  /// HEALTH_MONITOR_EXTERNAL, HEALTH_MONITOR_UDP, HEALTH_MONITOR_DNS.
  #[serde(rename = "type")]
  pub monitor_type: Option<String>,

  /// Health monitor for UDP.
  pub udp_monitor: Option<HealthMonitorUdp>,

  /// URL of this object.
  pub url: Option<String>,

  pub uuid: Option<String>,
}

impl ApiResource for HealthMonitor {
  const NAME: &'static str = "healthmonitor";
  const REQUIRED_FIELDS: &'static [&'static str] = &["name", "type"];

  fn uuid(&self) -> Option<&str> {
    self.uuid.as_deref()
  }

  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

/// HTTP(S) request/response probe settings.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMonitorHttp {
  /// Use the exact http_request string as specified by user, without any
  /// automatic insert of headers like Host header.
  pub exact_http_request: Option<bool>,

  /// Send an HTTP request to the server. The default GET / HTTP/1.0 may be
  /// extended with additional headers or information.
  pub http_request: Option<String>,

  /// Match for a keyword in the first 2Kb of the server header and body
  /// response.
  pub http_response: Option<String>,

  /// List of HTTP response codes to match as successful. Enum options -
  /// HTTP_ANY, HTTP_1XX, HTTP_2XX, HTTP_3XX, HTTP_4XX, HTTP_5XX.
  pub http_response_code: Option<Vec<String>>,

  /// Expected MD5 checksum of the response body.
  pub response_code: Option<String>,
}

/// TCP connect/echo probe settings.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMonitorTcp {
  /// Match for the desired keyword in the first 2Kb of the server's
  /// response. If this field is left blank, no server response is required.
  pub tcp_response: Option<String>,

  /// Request data to send after completing the TCP handshake.
  pub tcp_request: Option<String>,

  /// Configure TCP health monitor to use half-open TCP connections to
  /// monitor the health of backend servers thereby avoiding consumption of
  /// a full connection.
  pub tcp_half_open: Option<bool>,
}

/// UDP probe settings.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMonitorUdp {
  /// Match for keyword in the UDP response.
  pub udp_response: Option<String>,

  /// Send UDP request.
  pub udp_request: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_nested_monitor_encodes_as_nested_object() {
    let monitor = HealthMonitor {
      name: Some("hm-http".to_string()),
      monitor_type: Some("HEALTH_MONITOR_HTTP".to_string()),
      http_monitor: Some(HealthMonitorHttp {
        http_request: Some("HEAD / HTTP/1.0".to_string()),
        http_response_code: Some(vec!["HTTP_2XX".to_string(), "HTTP_3XX".to_string()]),
        ..Default::default()
      }),
      ..Default::default()
    };
    let json = serde_json::to_value(&monitor).unwrap();

    assert_eq!(json["type"], "HEALTH_MONITOR_HTTP");
    assert_eq!(json["http_monitor"]["http_request"], "HEAD / HTTP/1.0");
    assert_eq!(json["http_monitor"]["http_response_code"][1], "HTTP_3XX");
    assert!(json.get("tcp_monitor").is_none());
  }

  #[test]
  fn test_absent_sub_object_stays_absent_after_decode() {
    let monitor: HealthMonitor = serde_json::from_str(r#"{"name":"hm","type":"HEALTH_MONITOR_TCP"}"#).unwrap();

    assert!(monitor.http_monitor.is_none());
    assert!(monitor.tcp_monitor.is_none());
  }
}
