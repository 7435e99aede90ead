use crate::domain::edition::Edition;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_CONFIG_FILE: &str = "minebase.toml";
pub const DEFAULT_DATA_DIR: &str = "./minecraft-data";
pub const DATA_DIR_ENV: &str = "MINEBASE_DATA_DIR";
pub const DEFAULT_GIT_REF: &str = "master";
pub const UPSTREAM_REPOSITORY: &str = "https://github.com/PrismarineJS/minecraft-data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinebaseConfig {
    pub data: DataConfig,
    pub integrity: IntegrityConfig,
    pub fetch: FetchConfig,
    pub export: ExportConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Root of the minecraft-data checkout (the directory holding `data/`).
    pub dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        }
    }
}

/// Versions listed in `dataPaths.json` that the common `versions.json` omits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrityConfig {
    pub pc_manifest_only: Vec<String>,
    pub bedrock_manifest_only: Vec<String>,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            pc_manifest_only: vec!["1.16.5".to_string(), "1.21".to_string(), "1.21.6".to_string()],
            bedrock_manifest_only: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Full archive URL; derived from `git_ref` when unset.
    pub url: Option<String>,
    pub git_ref: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: None,
            git_ref: DEFAULT_GIT_REF.to_string(),
            timeout_seconds: 300,
        }
    }
}

impl FetchConfig {
    pub fn archive_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => archive_url_for_ref(&self.git_ref),
        }
    }
}

/// GitHub zip archive of minecraft-data at a branch, tag or commit.
pub fn archive_url_for_ref(git_ref: &str) -> String {
    format!("{}/archive/{}.zip", UPSTREAM_REPOSITORY, git_ref)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./export".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex must compile"))
}

impl MinebaseConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| MinebaseError::ConfigError {
            message: format!("Unable to read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Reads `path` when it exists, otherwise falls back to the defaults.
    pub fn from_optional_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No config file at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MinebaseError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("data.dir", &self.data.dir)?;
        validate_path("export.output_dir", &self.export.output_dir)?;

        if let Some(url) = &self.fetch.url {
            validate_url("fetch.url", url)?;
        } else {
            validate_non_empty_string("fetch.git_ref", &self.fetch.git_ref)?;
        }
        validate_positive_number("fetch.timeout_seconds", self.fetch.timeout_seconds, 1)?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for MinebaseConfig {
    fn data_dir(&self) -> &str {
        &self.data.dir
    }

    fn manifest_only_versions(&self, edition: Edition) -> &[String] {
        match edition {
            Edition::Pc => &self.integrity.pc_manifest_only,
            Edition::Bedrock => &self.integrity.bedrock_manifest_only,
        }
    }

    fn fetch_url(&self) -> String {
        self.fetch.archive_url()
    }

    fn export_dir(&self) -> &str {
        &self.export.output_dir
    }
}

impl Validate for MinebaseConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
