//! Configuration for the common-service module.

use serde::{Deserialize, Serialize};

/// Configuration for the common-service module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CommonServiceConfig {
    /// Path prefix every REST route is mounted under.
    /// Default: `/common/v1`
    pub route_prefix: String,
}

impl Default for CommonServiceConfig {
    fn default() -> Self {
        Self {
            route_prefix: "/common/v1".to_owned(),
        }
    }
}

impl CommonServiceConfig {
    /// Reads the module section of the application config.
    ///
    /// A missing or `null` section yields the defaults; a section that is
    /// present but malformed is an error.
    ///
    /// # Errors
    /// Returns the deserialization error for a malformed section.
    pub fn from_section(section: Option<&serde_json::Value>) -> Result<Self, serde_json::Error> {
        match section {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(v) => Self::deserialize(v),
        }
    }

    /// `route_prefix` without a trailing slash, always starting with one.
    #[must_use]
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.route_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}
