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

use thiserror::Error;

/// A rejection of the descriptor under validation, or an internal failure of
/// the validator itself. Every descriptor variant names the offending field
/// path and the rule it violated.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is empty or missing.
    #[error("{0} must not be empty")]
    Required(String),

    /// A mandatory block was not configured.
    #[error("{0} must be configured")]
    Unconfigured(String),

    /// A string field does not match its required grammar.
    #[error("{field}'s syntax is invalid: {value:?} is not {expected}")]
    Grammar {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Cross-field contradiction, such as mutually exclusive options both
    /// set or a duplicate version.
    #[error("{field}: {reason}")]
    Conflict { field: String, reason: String },

    /// A numeric field is outside its permitted range.
    #[error("{field} must be greater than {bound}, got {value}")]
    Bound { field: String, value: i32, bound: i32 },

    /// A field is set to a value outside its supported set.
    #[error("{field} only supports {allowed}, got {value:?}")]
    Unsupported {
        field: String,
        value: String,
        allowed: &'static str,
    },

    /// The pattern engine failed; says nothing about the descriptor.
    #[error("pattern {name:?} failed to compile")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    /// Whether the failure came from the validator itself rather than from
    /// the descriptor. Internal failures must not be surfaced to descriptor
    /// authors as a verdict.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Pattern { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let error = Error::Grammar {
            field: "spec.components[0].containers[0].resources.memory".into(),
            value: "512".into(),
            expected: "an integer with an Mi or Gi unit",
        };

        let message = error.to_string();
        assert!(message.contains("spec.components[0].containers[0].resources.memory"));
        assert!(message.contains("512"));
    }

    #[test]
    fn test_internal_errors_are_distinguished() {
        let internal = Error::Pattern {
            name: "dns-label",
            source: regex::Regex::new("(").unwrap_err(),
        };
        assert!(internal.is_internal());

        assert!(!Error::Required("metadata.name".into()).is_internal());
        assert!(!Error::Conflict { field: "x".into(), reason: "y".into() }.is_internal());
    }
}
