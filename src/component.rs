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

use std::collections::HashSet;

use overture_crds::application::{Component, WorkloadKind, PARAMETER_TYPES};

use crate::errors::{Error, Result};
use crate::non_empty;
use crate::patterns::DNS_LABEL;
use crate::{container, traits};

pub(crate) fn validate(
    component: &Component,
    field: &str,
    family: &mut Option<String>,
    versions: &mut HashSet<String>,
) -> Result<()> {
    non_empty(&format!("{field}.name"), &component.name)?;
    DNS_LABEL.check(&format!("{field}.name"), &component.name)?;

    // All components of one application form a single workload family,
    // distinguished by version.
    match family {
        None => *family = Some(component.name.clone()),
        Some(name) if *name != component.name => {
            return Err(Error::Conflict {
                field: format!("{field}.name"),
                reason: format!(
                    "all components must share one name, expected {:?}, got {:?}",
                    name, component.name
                ),
            });
        }
        Some(_) => {}
    }

    match component.workload {
        Some(WorkloadKind::Server) => {}
        Some(kind) => {
            return Err(Error::Unsupported {
                field: format!("{field}.workload"),
                value: kind.to_string(),
                allowed: "Server",
            });
        }
        None => return Err(Error::Unconfigured(format!("{field}.workload"))),
    }

    non_empty(&format!("{field}.version"), &component.version)?;
    if !versions.insert(component.version.clone()) {
        return Err(Error::Conflict {
            field: format!("{field}.version"),
            reason: format!("duplicate version {:?}", component.version),
        });
    }

    for (i, parameter) in component.parameters.iter().enumerate() {
        let field = format!("{field}.parameters[{i}]");
        non_empty(&format!("{field}.name"), &parameter.name)?;
        if !PARAMETER_TYPES.contains(&parameter.r#type.as_str()) {
            return Err(Error::Unsupported {
                field: format!("{field}.type"),
                value: parameter.r#type.clone(),
                allowed: "int, float, string, bool or json",
            });
        }
    }

    if component.containers.is_empty() {
        return Err(Error::Required(format!("{field}.containers")));
    }
    for (i, container) in component.containers.iter().enumerate() {
        container::validate(container, &format!("{field}.containers[{i}]"))?;
    }

    if let Some(dev_traits) = &component.dev_traits {
        traits::validate_developer(dev_traits, &format!("{field}.devTraits"))?;
    }

    match &component.opt_traits {
        Some(opt_traits) => traits::validate_operational(opt_traits, &format!("{field}.optTraits"))?,
        None => return Err(Error::Unconfigured(format!("{field}.optTraits"))),
    }

    if let Some(scaling) = &component.autoscaling {
        traits::validate_autoscaling(scaling, &format!("{field}.autoscaling"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use overture_crds::application::Parameter;

    use super::*;
    use crate::fixtures;

    fn check(component: &Component) -> Result<()> {
        validate(component, "c", &mut None, &mut HashSet::new())
    }

    #[test]
    fn test_name_must_be_a_dns_label() {
        let mut component = fixtures::component();
        component.name = "MyApp".into();

        let error = check(&component).unwrap_err();
        assert!(matches!(&error, Error::Grammar { field, .. } if field == "c.name"));
    }

    #[test]
    fn test_only_server_workloads_are_admitted() {
        let mut component = fixtures::component();
        component.workload = Some(WorkloadKind::Worker);
        let error = check(&component).unwrap_err();
        assert!(matches!(&error, Error::Unsupported { value, .. } if value == "Worker"));

        component.workload = None;
        assert!(matches!(check(&component).unwrap_err(), Error::Unconfigured(_)));
    }

    #[test]
    fn test_version_is_required_and_unique() {
        let mut component = fixtures::component();
        component.version = "".into();
        assert!(matches!(check(&component).unwrap_err(), Error::Required(_)));

        let component = fixtures::component();
        let mut family = None;
        let mut versions = HashSet::new();
        assert!(validate(&component, "c[0]", &mut family, &mut versions).is_ok());

        let error = validate(&component, "c[1]", &mut family, &mut versions).unwrap_err();
        assert!(matches!(&error, Error::Conflict { field, .. } if field == "c[1].version"));
    }

    #[test]
    fn test_components_form_one_family() {
        let first = fixtures::component();
        let mut second = fixtures::component();
        second.name = "other".into();
        second.version = "v2".into();

        let mut family = None;
        let mut versions = HashSet::new();
        validate(&first, "c[0]", &mut family, &mut versions).unwrap();

        let error = validate(&second, "c[1]", &mut family, &mut versions).unwrap_err();
        assert!(matches!(&error, Error::Conflict { field, .. } if field == "c[1].name"));
    }

    #[test]
    fn test_parameter_shape() {
        let mut component = fixtures::component();
        component.parameters =
            vec![Parameter { name: "replicas".into(), r#type: "number".into(), ..Default::default() }];
        let error = check(&component).unwrap_err();
        assert!(matches!(&error, Error::Unsupported { field, .. } if field == "c.parameters[0].type"));

        component.parameters =
            vec![Parameter { name: "replicas".into(), r#type: "int".into(), ..Default::default() }];
        assert!(check(&component).is_ok());
    }

    #[test]
    fn test_at_least_one_container() {
        let mut component = fixtures::component();
        component.containers.clear();

        let error = check(&component).unwrap_err();
        assert!(matches!(error, Error::Required(field) if field == "c.containers"));
    }

    #[test]
    fn test_operational_traits_are_mandatory() {
        let mut component = fixtures::component();
        component.opt_traits = None;

        let error = check(&component).unwrap_err();
        assert!(matches!(error, Error::Unconfigured(field) if field == "c.optTraits"));
    }
}
