// Copyright (c) The Overture Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ingress load-balancing algorithms selectable via `IngressLb::lb_type`.
pub const LB_TYPES: [&str; 3] = ["rr", "leastConn", "random"];

/// The only consistency strategy selectable via `IngressLb::consistent_type`.
pub const CONSISTENT_SOURCE_IP: &str = "sourceIP";

/// Traits configured by the component's developers.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeveloperTraits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_config: Option<ImagePullConfig>,
    #[serde(rename = "staticIP")]
    pub static_ip: bool,
    #[serde(rename = "ingressLB", skip_serializing_if = "Option::is_none")]
    pub ingress_lb: Option<IngressLb>,
}

/// Credentials for pulling images from a private registry. All three fields
/// must be present together.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagePullConfig {
    pub registry: String,
    pub username: String,
    pub password: String,
}

/// Ingress load-balancing policy: either a named algorithm (`lb_type`) or a
/// consistency strategy (`consistent_type`), never both.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct IngressLb {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lb_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_type: Option<String>,
}

/// Traits configured by the platform operators. Ingress and the manual
/// scaler are mandatory; everything else is opt-in.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationalTraits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<Ingress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_scaler: Option<ManualScaler>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_mounter: Option<VolumeMounter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub eject: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_list: Option<WhiteList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_retry: Option<HttpRetry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_breaking: Option<CircuitBreaking>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Ingress {
    pub host: String,
    /// Path routed to the component. Only `/` is supported at the moment.
    pub path: String,
    pub server_port: i32,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManualScaler {
    pub replicas: i32,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeMounter {
    pub volume_name: String,
    pub storage_class: String,
}

/// Request quota enforced over a rolling time window, with optional
/// per-user overrides.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RateLimit {
    /// The window length, an integer with a unit of seconds, minutes or
    /// days (e.g. `30s`, `5m`, `1d`).
    pub time_duration: String,
    pub request_amount: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Override {
    pub request_amount: i32,
    pub user: String,
}

/// Users permitted to reach the component, identified by email address.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WhiteList {
    pub users: Vec<String>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpRetry {
    pub attempts: i32,
    /// Timeout per retry attempt, an interval such as `15s`.
    pub per_try_timeout: String,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CircuitBreaking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_pool: Option<ConnectionPoolSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlier_detection: Option<OutlierDetection>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionPoolSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp: Option<TcpSettings>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TcpSettings {
    pub max_connections: i32,
    pub connect_timeout: String,
}

/// Ejection policy for hosts that keep failing.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlierDetection {
    pub consecutive_errors: i32,
    pub interval: String,
    pub base_ejection_time: String,
    pub max_ejection_percent: i32,
}

/// Component-level scaling policy driven by a metric threshold.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Autoscaling {
    pub metric: String,
    pub threshold: i32,
    pub min_replicas: i32,
    pub max_replicas: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metric: Option<CustomMetric>,
}

/// Custom-metric mode: scaling decisions come from probing the given URI.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomMetric {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_developer_traits_wire_names() {
        let traits = DeveloperTraits {
            static_ip: true,
            ingress_lb: Some(IngressLb { lb_type: Some("rr".into()), ..Default::default() }),
            ..Default::default()
        };

        let json = serde_json::to_value(&traits).unwrap();
        assert_eq!(json["staticIP"], true);
        assert_eq!(json["ingressLB"]["lbType"], "rr");
    }

    #[test]
    fn test_operational_traits_deserializes_sparse_manifest() {
        let traits: OperationalTraits = serde_yaml::from_str(
            r#"
            ingress:
              host: example.com
              path: /
              serverPort: 80
            manualScaler:
              replicas: 2
            "#,
        )
        .unwrap();

        assert_eq!(traits.ingress.as_ref().unwrap().server_port, 80);
        assert_eq!(traits.manual_scaler.as_ref().unwrap().replicas, 2);
        assert!(traits.rate_limit.is_none());
        assert!(traits.circuit_breaking.is_none());
    }

    #[test]
    fn test_rate_limit_defaults() {
        let limit = RateLimit::default();
        assert!(limit.time_duration.is_empty());
        assert_eq!(limit.request_amount, 0);
        assert!(limit.overrides.is_empty());
    }
}
