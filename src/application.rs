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

use kube::ResourceExt;
use overture_crds::application::Application;
use overture_crds::REQUIRED_LABELS;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::patterns::DNS_LABEL;
use crate::{component, traits};

/// Validate an application descriptor prior to admission.
///
/// Walks the descriptor top-down and returns the first violation found, or
/// `Ok(())` when the descriptor is admissible. The check is pure and
/// deterministic: it reads nothing but its input and the same descriptor
/// always yields the same verdict.
pub fn validate(app: &Application) -> Result<()> {
    let name = app.name_any();
    debug!("Validating application {:?}", name);

    if name.is_empty() {
        return Err(Error::Required("metadata.name".into()));
    }
    DNS_LABEL.check("metadata.name", &name)?;

    let labels = app.labels();
    for label in REQUIRED_LABELS {
        if !labels.contains_key(label) {
            return Err(Error::Required(format!("metadata.labels.{label}")));
        }
    }

    if app.spec.components.is_empty() {
        return Err(Error::Required("spec.components".into()));
    }

    let mut family = None;
    let mut versions = HashSet::new();
    for (i, component) in app.spec.components.iter().enumerate() {
        component::validate(component, &format!("spec.components[{i}]"), &mut family, &mut versions)?;
    }

    if let Some(opt_traits) = &app.spec.opt_traits {
        traits::validate_operational(opt_traits, "spec.optTraits")?;
    }

    Ok(())
}
