use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Application configuration, loaded once at startup from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub accounts: AccountConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the sqlite database file.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Whether local and social sign-up are open. Consulted through the
    /// account adapters, never read again after startup.
    pub allow_registration: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            accounts: AccountConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "vizcatalog.db".to_string(),
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_registration_open() {
        let config = AppConfig::default();
        assert!(config.accounts.allow_registration);
        assert_eq!(config.database.path, "vizcatalog.db");
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
accounts:
  allow_registration: false
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.accounts.allow_registration);
        assert_eq!(config.database.path, "vizcatalog.db");
    }

    #[test]
    fn full_yaml_round_trips() {
        let config = AppConfig {
            database: DatabaseConfig {
                path: "catalog.db".to_string(),
            },
            accounts: AccountConfig {
                allow_registration: false,
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.database.path, "catalog.db");
        assert!(!parsed.accounts.allow_registration);
    }
}
