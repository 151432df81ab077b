//! Global configuration types for Punchcard.
//!
//! `PunchcardConfig` represents the top-level `config.toml`: authorization
//! roles offered by the users content type, the fields list endpoints may be
//! sorted by, and server/logging settings.

use serde::{Deserialize, Serialize};

/// Top-level configuration. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchcardConfig {
    /// Authorization roles selectable on a user.
    #[serde(default = "default_roles")]
    pub roles: Vec<RoleConfig>,

    #[serde(default)]
    pub sort_fields: SortFields,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PunchcardConfig {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            sort_fields: SortFields::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// An authorization role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub id: String,
    pub name: String,
}

fn default_roles() -> Vec<RoleConfig> {
    [("admin", "Admin"), ("editor", "Editor"), ("contributor", "Contributor")]
        .into_iter()
        .map(|(id, name)| RoleConfig {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// Allowed sort fields per listing. The first entry is the default sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortFields {
    /// Content records (`/api/types/{type}`).
    #[serde(default = "default_content_sort_fields")]
    pub content: Vec<String>,
    /// Content-type definitions (`/api`, `/api/types`).
    #[serde(default = "default_type_sort_fields")]
    pub types: Vec<String>,
}

fn default_content_sort_fields() -> Vec<String> {
    ["key", "type", "created_at", "updated_at"]
        .map(String::from)
        .to_vec()
}

fn default_type_sort_fields() -> Vec<String> {
    ["name", "id", "description"].map(String::from).to_vec()
}

impl Default for SortFields {
    fn default() -> Self {
        Self {
            content: default_content_sort_fields(),
            types: default_type_sort_fields(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
    /// Export spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: PunchcardConfig = toml::from_str("").unwrap();
        assert_eq!(config.roles.len(), 3);
        assert_eq!(config.roles[0].id, "admin");
        assert_eq!(config.sort_fields.content[0], "key");
        assert_eq!(config.sort_fields.types[0], "name");
        assert_eq!(config.server.port, 8080);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
[[roles]]
id = "owner"
name = "Owner"

[sort_fields]
content = ["updated_at", "key"]

[server]
port = 9000

[logging]
json = true
"#;
        let config: PunchcardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.roles.len(), 1);
        assert_eq!(config.roles[0].name, "Owner");
        assert_eq!(config.sort_fields.content, vec!["updated_at", "key"]);
        assert_eq!(config.sort_fields.types[0], "name");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert!(config.logging.json);
    }
}
