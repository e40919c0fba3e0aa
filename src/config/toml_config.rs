use crate::core::{ConfigProvider, ConnectionParams};
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "inventory.toml";
pub const DEFAULT_DATABASE_FILE: &str = "inventory.db";
pub const DEFAULT_SOURCE_FILE: &str = "Inventario ICXX.txt";
pub const DEFAULT_EXPORT_FILE: &str = "export.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub source: String,
    /// Clear the store before writing instead of appending.
    #[serde(default)]
    pub replace_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE_FILE.to_string(),
            replace_existing: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

impl TomlConfig {
    /// Default configuration storing posts in the SQLite file `database`.
    pub fn with_database(database: &str) -> Self {
        Self {
            store: StoreConfig {
                url: format!("sqlite:{}", database),
                user: String::new(),
                password: String::new(),
            },
            import: ImportConfig::default(),
            export: ExportConfig::default(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InventoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InventoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `path`, or writes and returns the defaults when it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_create<P: AsRef<Path>>(path: P, database: &str) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        let config = Self::with_database(database);
        match config.save(path) {
            Ok(()) => tracing::info!(
                "Created configuration file {} for {}",
                path.display(),
                database
            ),
            Err(e) => tracing::warn!(
                "Could not save configuration to {}: {}",
                path.display(),
                e
            ),
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| InventoryError::ConfigError {
            message: format!("TOML serialization error: {}", e),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replaces `${VAR}` placeholders; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InventoryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("store.url", &self.store.url)?;
        validate_path("import.source", &self.import.source)?;
        validate_path("export.output", &self.export.output)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn connection_params(&self) -> ConnectionParams {
        ConnectionParams::new(
            self.store.url.clone(),
            self.store.user.clone(),
            self.store.password.clone(),
        )
    }

    fn source_path(&self) -> &str {
        &self.import.source
    }

    fn replace_existing(&self) -> bool {
        self.import.replace_existing
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
