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

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{Error, Result};

/// A named leaf validator backed by a regular expression, compiled once on
/// first use and shared across call sites. A compilation failure surfaces as
/// [`Error::Pattern`] instead of panicking, so callers can tell an internal
/// fault apart from a descriptor rejection.
pub struct Pattern {
    name: &'static str,
    expected: &'static str,
    source: &'static str,
    compiled: OnceLock<std::result::Result<Regex, regex::Error>>,
}

impl Pattern {
    const fn new(name: &'static str, expected: &'static str, source: &'static str) -> Self {
        Pattern { name, expected, source, compiled: OnceLock::new() }
    }

    /// The regex source, for diagnostics.
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn matches(&self, value: &str) -> Result<bool> {
        match self.compiled.get_or_init(|| Regex::new(self.source)) {
            Ok(regex) => Ok(regex.is_match(value)),
            Err(error) => Err(Error::Pattern { name: self.name, source: error.clone() }),
        }
    }

    /// Check `value` against the pattern, reporting a grammar violation on
    /// `field` when it does not match.
    pub fn check(&self, field: &str, value: &str) -> Result<()> {
        if self.matches(value)? {
            Ok(())
        } else {
            Err(Error::Grammar {
                field: field.to_string(),
                value: value.to_string(),
                expected: self.expected,
            })
        }
    }
}

/// DNS-1035 label: lower case alphanumeric characters or '-', starting with
/// an alphabetic character and ending with an alphanumeric one (e.g.
/// `my-name` or `abc-123`).
pub static DNS_LABEL: Pattern =
    Pattern::new("dns-label", "a DNS-1035 label", r"^[a-z]([-a-z0-9]*[a-z0-9])?$");

/// Memory quantity: an integer with a binary unit, e.g. `512Mi` or `2Gi`.
pub static MEMORY_QUANTITY: Pattern =
    Pattern::new("memory-quantity", "an integer with an Mi or Gi unit", r"^[0-9]\d*[MG]i$");

/// CPU quantity: an integer number of millicores, e.g. `500m`.
pub static CPU_QUANTITY: Pattern =
    Pattern::new("cpu-quantity", "an integer number of millicores", r"^[0-9]\d*m$");

/// Time interval: an integer with a unit of seconds, minutes or days, e.g.
/// `30s`, `5m` or `1d`.
pub static INTERVAL: Pattern =
    Pattern::new("interval", "an integer with an s, m or d unit", r"^[0-9]\d*[smd]$");

/// Absolute multi-segment path, e.g. `/etc/app/conf`.
pub static CONFIG_PATH: Pattern =
    Pattern::new("config-path", "an absolute path of word segments", r"^/(\w+/?)+$");

/// Loose email shape; membership lists only need a user@domain form.
pub static EMAIL: Pattern = Pattern::new("email", "an email address", r"^.*@.*$");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_label() {
        for name in ["myapp", "my-name", "abc-123", "a"] {
            assert!(DNS_LABEL.matches(name).unwrap(), "{name} should be a valid label");
        }
        for name in ["", "-app", "app-", "MyApp", "my_app", "my.app"] {
            assert!(!DNS_LABEL.matches(name).unwrap(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_memory_quantity() {
        for quantity in ["512Mi", "2Gi", "1024Mi"] {
            assert!(MEMORY_QUANTITY.matches(quantity).unwrap());
        }
        for quantity in ["", "512", "512mi", "512Ki", "Gi", "0.5Gi"] {
            assert!(!MEMORY_QUANTITY.matches(quantity).unwrap(), "{quantity} should be rejected");
        }
    }

    #[test]
    fn test_cpu_quantity() {
        for quantity in ["500m", "1m", "2000m"] {
            assert!(CPU_QUANTITY.matches(quantity).unwrap());
        }
        for quantity in ["", "500", "0.5m", "500M"] {
            assert!(!CPU_QUANTITY.matches(quantity).unwrap(), "{quantity} should be rejected");
        }
    }

    #[test]
    fn test_interval() {
        for interval in ["30s", "5m", "1d", "90s"] {
            assert!(INTERVAL.matches(interval).unwrap());
        }
        for interval in ["", "30", "s", "30h", "1w"] {
            assert!(!INTERVAL.matches(interval).unwrap(), "{interval} should be rejected");
        }
    }

    #[test]
    fn test_config_path() {
        for path in ["/etc", "/etc/conf", "/etc/conf/", "/opt/app_1"] {
            assert!(CONFIG_PATH.matches(path).unwrap(), "{path} should be accepted");
        }
        for path in ["", "etc/conf", "/", "/etc//conf", "/etc/my-conf"] {
            assert!(!CONFIG_PATH.matches(path).unwrap(), "{path} should be rejected");
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(EMAIL.matches("alice@example.com").unwrap());
        assert!(EMAIL.matches("a@b").unwrap());
        assert!(!EMAIL.matches("alice").unwrap());
    }

    #[test]
    fn test_check_reports_the_field() {
        let error = MEMORY_QUANTITY.check("resources.memory", "512").unwrap_err();
        let message = error.to_string();

        assert!(message.contains("resources.memory"));
        assert!(message.contains("512"));
        assert!(!error.is_internal());
    }
}
