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

pub mod application;
pub mod component;
pub mod container;
pub mod errors;
pub mod patterns;
pub mod traits;

pub use application::validate;
pub use errors::{Error, Result};

/// Reject an empty value for a required string field.
pub(crate) fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Required(field.to_string()));
    }
    Ok(())
}

/// Reject a zero or negative value for a field that must be positive.
pub(crate) fn positive(field: &str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(Error::Bound { field: field.to_string(), value, bound: 0 });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use overture_crds::application::{Application, ApplicationSpec, Component, Container, WorkloadKind};
    use overture_crds::traits::{Ingress, ManualScaler, OperationalTraits};
    use overture_crds::{PROJECT_LABEL, TEMPLATE_LABEL};

    /// The smallest descriptor that passes validation: one component with
    /// one container, an ingress on the root path and two replicas.
    pub(crate) fn application() -> Application {
        let mut app =
            Application::new("myapp", ApplicationSpec { components: vec![component()], opt_traits: None });
        app.metadata.labels = Some(BTreeMap::from([
            (PROJECT_LABEL.to_string(), "p-100".to_string()),
            (TEMPLATE_LABEL.to_string(), "t-100".to_string()),
        ]));
        app
    }

    pub(crate) fn component() -> Component {
        Component {
            name: "myapp".into(),
            version: "v1".into(),
            workload: Some(WorkloadKind::Server),
            containers: vec![container()],
            opt_traits: Some(opt_traits()),
            ..Default::default()
        }
    }

    pub(crate) fn container() -> Container {
        Container { name: "web".into(), image: "nginx:1.0".into(), ..Default::default() }
    }

    pub(crate) fn opt_traits() -> OperationalTraits {
        OperationalTraits {
            ingress: Some(Ingress { host: "example.com".into(), path: "/".into(), server_port: 80 }),
            manual_scaler: Some(ManualScaler { replicas: 2 }),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixtures_are_valid() {
        assert!(crate::validate(&application()).is_ok());
    }
}
