use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scan::AnalyzerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_export_directory")]
    pub export_directory: PathBuf,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

fn default_database_path() -> PathBuf {
    crate::db::default_database_path().unwrap_or_else(|| PathBuf::from("codescan.db"))
}

fn default_export_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("codescan")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            export_directory: default_export_directory(),
            language: Language::default(),
            generator: GeneratorConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

/// Display language. `System` follows the platform locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "")]
    System,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh")]
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::System => "",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Concrete language for user-facing text. `System` reads the locale
    /// from `LC_ALL`, `LC_MESSAGES` or `LANG`, in that order.
    pub fn resolve(self) -> Language {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty());
        self.resolve_with(locale.as_deref())
    }

    /// Like [`resolve`](Self::resolve), with the locale string given.
    /// Anything other than a `zh` locale falls back to English.
    pub fn resolve_with(self, locale: Option<&str>) -> Language {
        match self {
            Language::System => match locale {
                Some(locale) if locale.to_ascii_lowercase().starts_with("zh") => Language::Zh,
                _ => Language::En,
            },
            explicit => explicit,
        }
    }
}

/// Canvas dimensions for generated codes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_matrix_size")]
    pub matrix_size: u32,
    #[serde(default = "default_linear_width")]
    pub linear_width: u32,
    #[serde(default = "default_linear_height")]
    pub linear_height: u32,
}

fn default_matrix_size() -> u32 {
    400
}

fn default_linear_width() -> u32 {
    400
}

fn default_linear_height() -> u32 {
    200
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            matrix_size: default_matrix_size(),
            linear_width: default_linear_width(),
            linear_height: default_linear_height(),
        }
    }
}
