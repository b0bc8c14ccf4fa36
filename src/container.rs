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

use overture_crds::application::{
    ConfigFile, Container, EnvVar, HealthProbe, ResourceRequest, ALLOWED_FROM_PARAMS,
};

use crate::errors::{Error, Result};
use crate::patterns::{CONFIG_PATH, CPU_QUANTITY, MEMORY_QUANTITY};
use crate::{non_empty, positive};

pub(crate) fn validate(container: &Container, field: &str) -> Result<()> {
    non_empty(&format!("{field}.name"), &container.name)?;

    for (i, env) in container.env.iter().enumerate() {
        validate_env(env, &format!("{field}.env[{i}]"))?;
    }
    for (i, config) in container.config.iter().enumerate() {
        validate_config(config, &format!("{field}.config[{i}]"))?;
    }

    non_empty(&format!("{field}.image"), &container.image)?;

    for (i, port) in container.ports.iter().enumerate() {
        positive(&format!("{field}.ports[{i}].containerPort"), port.container_port)?;
    }

    if let Some(resources) = &container.resources {
        validate_resources(resources, &format!("{field}.resources"))?;
    }
    if let Some(probe) = &container.liveness_probe {
        validate_probe(probe, &format!("{field}.livenessProbe"))?;
    }
    if let Some(probe) = &container.readiness_probe {
        validate_probe(probe, &format!("{field}.readinessProbe"))?;
    }

    Ok(())
}

/// An env var carries exactly one source: a literal value, or a reference to
/// one of the whitelisted runtime-derived fields.
fn validate_env(env: &EnvVar, field: &str) -> Result<()> {
    non_empty(&format!("{field}.name"), &env.name)?;

    match (&env.value, &env.from_param) {
        (Some(_), Some(_)) => Err(Error::Conflict {
            field: field.to_string(),
            reason: "only one of value and fromParam may be set".into(),
        }),
        (None, None) => Err(Error::Conflict {
            field: field.to_string(),
            reason: "either value or fromParam must be set".into(),
        }),
        (None, Some(param)) if !ALLOWED_FROM_PARAMS.contains(&param.as_str()) => {
            Err(Error::Unsupported {
                field: format!("{field}.fromParam"),
                value: param.clone(),
                allowed: "spec.nodeName, metadata.name, metadata.namespace or status.podIP",
            })
        }
        _ => Ok(()),
    }
}

fn validate_config(config: &ConfigFile, field: &str) -> Result<()> {
    non_empty(&format!("{field}.path"), &config.path)?;
    non_empty(&format!("{field}.fileName"), &config.file_name)?;
    non_empty(&format!("{field}.value"), &config.value)?;
    CONFIG_PATH.check(&format!("{field}.path"), &config.path)
}

fn validate_resources(resources: &ResourceRequest, field: &str) -> Result<()> {
    MEMORY_QUANTITY.check(&format!("{field}.memory"), &resources.memory)?;
    if let Some(cpu) = &resources.cpu {
        CPU_QUANTITY.check(&format!("{field}.cpu"), cpu)?;
    }

    for (i, volume) in resources.volumes.iter().enumerate() {
        let field = format!("{field}.volumes[{i}]");
        non_empty(&format!("{field}.name"), &volume.name)?;
        non_empty(&format!("{field}.mountPath"), &volume.mount_path)?;

        if !volume.disk.ephemeral && volume.disk.required.as_deref().unwrap_or("").is_empty() {
            return Err(Error::Conflict {
                field: format!("{field}.disk.required"),
                reason: "must be set when the disk is not ephemeral".into(),
            });
        }
    }

    Ok(())
}

fn validate_probe(probe: &HealthProbe, field: &str) -> Result<()> {
    let configured = [probe.exec.is_some(), probe.http_get.is_some(), probe.tcp_socket.is_some()]
        .iter()
        .filter(|present| **present)
        .count();
    if configured != 1 {
        return Err(Error::Conflict {
            field: field.to_string(),
            reason: format!("exactly one of exec, httpGet and tcpSocket must be configured, found {configured}"),
        });
    }

    if let Some(exec) = &probe.exec {
        if exec.command.is_empty() {
            return Err(Error::Required(format!("{field}.exec.command")));
        }
    }
    if let Some(http_get) = &probe.http_get {
        non_empty(&format!("{field}.httpGet.path"), &http_get.path)?;
        positive(&format!("{field}.httpGet.port"), http_get.port)?;
    }
    if let Some(tcp_socket) = &probe.tcp_socket {
        positive(&format!("{field}.tcpSocket.port"), tcp_socket.port)?;
    }

    positive(&format!("{field}.initialDelaySeconds"), probe.initial_delay_seconds)?;
    positive(&format!("{field}.periodSeconds"), probe.period_seconds)?;
    positive(&format!("{field}.successThreshold"), probe.success_threshold)?;
    positive(&format!("{field}.failureThreshold"), probe.failure_threshold)?;

    Ok(())
}
