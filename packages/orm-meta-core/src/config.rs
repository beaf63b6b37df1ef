//! Connection naming configuration.

use serde::Deserialize;

use crate::error::OrmError;

/// Defaults inherited by table definitions that do not name their own
/// connections or schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    /// Connection used for reads
    pub default_connection: String,
    /// Connection used for writes (None = same as `default_connection`)
    pub default_writable_connection: Option<String>,
    /// Database schema (None = connection default)
    pub default_schema: Option<String>,
}

impl OrmConfig {
    /// Parses a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, OrmError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the writable connection name, falling back to the read one.
    pub fn writable_connection(&self) -> &str {
        self.default_writable_connection
            .as_deref()
            .unwrap_or(&self.default_connection)
    }
}

impl Default for OrmConfig {
    fn default() -> Self {
        Self {
            default_connection: "default".to_string(),
            default_writable_connection: None,
            default_schema: None,
        }
    }
}
