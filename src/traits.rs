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

use overture_crds::traits::{
    Autoscaling, CircuitBreaking, DeveloperTraits, Ingress, OperationalTraits, RateLimit,
    CONSISTENT_SOURCE_IP, LB_TYPES,
};

use crate::errors::{Error, Result};
use crate::patterns::{EMAIL, INTERVAL};
use crate::{non_empty, positive};

pub(crate) fn validate_developer(traits: &DeveloperTraits, field: &str) -> Result<()> {
    if let Some(config) = &traits.image_pull_config {
        // All-or-nothing: a partial credential is always a mistake.
        let field = format!("{field}.imagePullConfig");
        non_empty(&format!("{field}.registry"), &config.registry)?;
        non_empty(&format!("{field}.username"), &config.username)?;
        non_empty(&format!("{field}.password"), &config.password)?;
    }

    if let Some(lb) = &traits.ingress_lb {
        let field = format!("{field}.ingressLB");
        if lb.lb_type.is_some() && lb.consistent_type.is_some() {
            return Err(Error::Conflict {
                field,
                reason: "only one of lbType and consistentType may be set".into(),
            });
        }
        if let Some(lb_type) = &lb.lb_type {
            if !LB_TYPES.contains(&lb_type.as_str()) {
                return Err(Error::Unsupported {
                    field: format!("{field}.lbType"),
                    value: lb_type.clone(),
                    allowed: "rr, leastConn or random",
                });
            }
        }
        if let Some(consistent) = &lb.consistent_type {
            if consistent != CONSISTENT_SOURCE_IP {
                return Err(Error::Unsupported {
                    field: format!("{field}.consistentType"),
                    value: consistent.clone(),
                    allowed: "sourceIP",
                });
            }
        }
    }

    Ok(())
}

pub(crate) fn validate_operational(traits: &OperationalTraits, field: &str) -> Result<()> {
    let ingress = traits
        .ingress
        .as_ref()
        .ok_or_else(|| Error::Unconfigured(format!("{field}.ingress")))?;
    validate_ingress(ingress, &format!("{field}.ingress"))?;

    let scaler = traits
        .manual_scaler
        .as_ref()
        .ok_or_else(|| Error::Unconfigured(format!("{field}.manualScaler")))?;
    positive(&format!("{field}.manualScaler.replicas"), scaler.replicas)?;

    if let Some(limit) = &traits.rate_limit {
        validate_rate_limit(limit, &format!("{field}.rateLimit"))?;
    }
    if let Some(list) = &traits.white_list {
        for (i, user) in list.users.iter().enumerate() {
            EMAIL.check(&format!("{field}.whiteList.users[{i}]"), user)?;
        }
    }
    if let Some(retry) = &traits.http_retry {
        let field = format!("{field}.httpRetry");
        positive(&format!("{field}.attempts"), retry.attempts)?;
        non_empty(&format!("{field}.perTryTimeout"), &retry.per_try_timeout)?;
        INTERVAL.check(&format!("{field}.perTryTimeout"), &retry.per_try_timeout)?;
    }
    if let Some(breaker) = &traits.circuit_breaking {
        validate_circuit_breaking(breaker, &format!("{field}.circuitBreaking"))?;
    }

    Ok(())
}

fn validate_ingress(ingress: &Ingress, field: &str) -> Result<()> {
    non_empty(&format!("{field}.host"), &ingress.host)?;
    non_empty(&format!("{field}.path"), &ingress.path)?;
    positive(&format!("{field}.serverPort"), ingress.server_port)?;

    // Path routing is not implemented yet, the gateway only takes the root.
    if ingress.path != "/" {
        return Err(Error::Unsupported {
            field: format!("{field}.path"),
            value: ingress.path.clone(),
            allowed: "\"/\"",
        });
    }

    Ok(())
}

fn validate_rate_limit(limit: &RateLimit, field: &str) -> Result<()> {
    non_empty(&format!("{field}.timeDuration"), &limit.time_duration)?;
    positive(&format!("{field}.requestAmount"), limit.request_amount)?;
    INTERVAL.check(&format!("{field}.timeDuration"), &limit.time_duration)?;

    for (i, entry) in limit.overrides.iter().enumerate() {
        let field = format!("{field}.overrides[{i}]");
        non_empty(&format!("{field}.user"), &entry.user)?;
        positive(&format!("{field}.requestAmount"), entry.request_amount)?;
    }

    Ok(())
}

fn validate_circuit_breaking(breaker: &CircuitBreaking, field: &str) -> Result<()> {
    if let Some(pool) = &breaker.connection_pool {
        if let Some(tcp) = &pool.tcp {
            let field = format!("{field}.connectionPool.tcp");
            positive(&format!("{field}.maxConnections"), tcp.max_connections)?;
            non_empty(&format!("{field}.connectTimeout"), &tcp.connect_timeout)?;
            INTERVAL.check(&format!("{field}.connectTimeout"), &tcp.connect_timeout)?;
        }
    }

    if let Some(detection) = &breaker.outlier_detection {
        let field = format!("{field}.outlierDetection");
        positive(&format!("{field}.consecutiveErrors"), detection.consecutive_errors)?;
        positive(&format!("{field}.maxEjectionPercent"), detection.max_ejection_percent)?;
        non_empty(&format!("{field}.interval"), &detection.interval)?;
        INTERVAL.check(&format!("{field}.interval"), &detection.interval)?;
        non_empty(&format!("{field}.baseEjectionTime"), &detection.base_ejection_time)?;
        INTERVAL.check(&format!("{field}.baseEjectionTime"), &detection.base_ejection_time)?;
    }

    Ok(())
}

pub(crate) fn validate_autoscaling(scaling: &Autoscaling, field: &str) -> Result<()> {
    non_empty(&format!("{field}.metric"), &scaling.metric)?;
    positive(&format!("{field}.threshold"), scaling.threshold)?;
    positive(&format!("{field}.minReplicas"), scaling.min_replicas)?;

    if scaling.max_replicas <= scaling.min_replicas {
        return Err(Error::Conflict {
            field: format!("{field}.maxReplicas"),
            reason: format!("must be greater than minReplicas ({})", scaling.min_replicas),
        });
    }

    if let Some(metric) = &scaling.custom_metric {
        non_empty(&format!("{field}.customMetric.uri"), &metric.uri)?;
    }

    Ok(())
}
