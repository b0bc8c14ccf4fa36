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

use std::fmt::Display;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::traits::{Autoscaling, DeveloperTraits, OperationalTraits};

pub static APPLICATION_RESOURCE_NAME: &str = "applications.overture.dev";

/// Runtime-derived fields an environment variable may reference instead of
/// carrying a literal value.
pub const ALLOWED_FROM_PARAMS: [&str; 4] =
    ["spec.nodeName", "metadata.name", "metadata.namespace", "status.podIP"];

/// Declared types a templated parameter may take.
pub const PARAMETER_TYPES: [&str; 5] = ["int", "float", "string", "bool", "json"];

#[derive(CustomResource, Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[kube(
    group = "overture.dev",
    version = "v1",
    kind = "Application",
    status = "ApplicationStatus",
    namespaced
)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationSpec {
    /// All the workload components involved in this application. Multiple
    /// components form one logical workload family, distinguished by version.
    pub components: Vec<Component>,
    /// Operational traits shared across all components. Optional; when set,
    /// the same rules apply as for the component-level traits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_traits: Option<OperationalTraits>,
}

/// One workload definition: a named, versioned unit containing one or more
/// containers, plus its developer-facing and operational traits.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Component {
    /// The name of the component, a DNS-1035 label.
    pub name: String,
    /// The version of the component, unique within one application.
    pub version: String,
    /// The kind of workload this component runs. Only `Server` is admitted
    /// at the moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<WorkloadKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// Templated parameters declared by the component. Declarations are
    /// checked for shape only; substitution happens elsewhere.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub containers: Vec<Container>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_traits: Option<DeveloperTraits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_traits: Option<OperationalTraits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<Autoscaling>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
pub enum WorkloadKind {
    Server,
    SingletonServer,
    Worker,
    SingletonWorker,
    Task,
    SingletonTask,
}

impl Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkloadKind::Server => f.write_str("Server"),
            WorkloadKind::SingletonServer => f.write_str("SingletonServer"),
            WorkloadKind::Worker => f.write_str("Worker"),
            WorkloadKind::SingletonWorker => f.write_str("SingletonWorker"),
            WorkloadKind::Task => f.write_str("Task"),
            WorkloadKind::SingletonTask => f.write_str("SingletonTask"),
        }
    }
}

/// A templated parameter declaration. Values are of type int, float, string,
/// bool or json, carried as strings until substitution.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub r#type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One process image declaration inside a component.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    /// The name of the container.
    pub name: String,
    /// Specifies the image to launch the container. The image must follow
    /// the Open Container Specification addressable image format.
    /// such as: [<registry>/][<project>/]<image>[:<tag>|@<digest>].
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    /// Config files injected into the container filesystem.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<ConfigFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<HealthProbe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<HealthProbe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<PullPolicy>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq)]
pub enum PullPolicy {
    /// Always attempt to pull the latest image.
    Always,
    /// Never pull an image, only use a local one.
    Never,
    /// Pull only if the image isn't present on disk.
    IfNotPresent,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Port {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub container_port: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// An environment variable, sourced from a literal value or from one of the
/// runtime-derived fields in [`ALLOWED_FROM_PARAMS`] — exactly one of the two.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_param: Option<String>,
}

/// A file rendered into the container at an absolute path.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    pub path: String,
    pub file_name: String,
    pub value: String,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceRequest {
    /// CPU request, an integer number of millicores (e.g. `500m`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    /// Memory request, an integer with a binary unit (e.g. `512Mi`, `2Gi`).
    pub memory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    pub mount_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing_policy: Option<String>,
    pub disk: Disk,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Disk {
    /// Requested disk size. Mandatory unless the disk is ephemeral.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<String>,
    pub ephemeral: bool,
}

/// A liveness or readiness probe. Exactly one of `exec`, `http_get` and
/// `tcp_socket` must be configured.
#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthProbe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_socket: Option<TcpSocketAction>,
    pub initial_delay_seconds: i32,
    pub timeout_seconds: i32,
    pub period_seconds: i32,
    pub success_threshold: i32,
    pub failure_threshold: i32,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecAction {
    pub command: Vec<String>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpGetAction {
    /// Path to access on the HTTP server.
    pub path: String,
    /// Number of the port to access on the container.
    pub port: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http_headers: Vec<HttpHeader>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TcpSocketAction {
    /// Number of the port to access on the container.
    pub port: i32,
}

/// Where the application sits in the admission lifecycle.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => f.write_str("Pending"),
            ApplicationStatus::Accepted => f.write_str("Accepted"),
            ApplicationStatus::Rejected => f.write_str("Rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_wire_names() {
        let env = EnvVar { name: "NODE".into(), from_param: Some("spec.nodeName".into()), ..Default::default() };

        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["name"], "NODE");
        assert_eq!(json["fromParam"], "spec.nodeName");
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_container_deserializes_with_defaults() {
        let container: Container = serde_json::from_str(r#"{"name": "web", "image": "nginx:1.0"}"#).unwrap();

        assert_eq!(container.name, "web");
        assert_eq!(container.image, "nginx:1.0");
        assert!(container.ports.is_empty());
        assert!(container.resources.is_none());
        assert!(container.liveness_probe.is_none());
    }

    #[test]
    fn test_workload_kind_display() {
        assert_eq!(WorkloadKind::Server.to_string(), "Server");
        assert_eq!(WorkloadKind::SingletonTask.to_string(), "SingletonTask");
    }

    #[test]
    fn test_application_status_display() {
        assert_eq!(ApplicationStatus::Rejected.to_string(), "Rejected");
    }
}
