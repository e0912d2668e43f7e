use std::path::{Path, PathBuf};

use crate::config::schema::AppConfig;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// `~/.codescan/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".codescan")
        .join("config.json")
}

/// Loads `path` if given, else the default location if it exists, else
/// built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                log::debug!("Loading config from {}", default_path.display());
                load_config(default_path)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let generator = &config.generator;
    let dimensions = [
        ("generator.matrix_size", generator.matrix_size),
        ("generator.linear_width", generator.linear_width),
        ("generator.linear_height", generator.linear_height),
    ];
    for (name, value) in dimensions {
        if value == 0 {
            return Err(ConfigError::Validation {
                message: format!("{} must be greater than zero", name),
            });
        }
    }

    if config.database_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation {
            message: "database_path must not be empty".to_string(),
        });
    }

    if let Some(window) = &config.analyzer.scan_window {
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::Validation {
                message: "analyzer.scan_window must have a non-zero size".to_string(),
            });
        }
    }

    Ok(())
}
