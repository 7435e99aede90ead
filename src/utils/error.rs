use crate::domain::edition::Edition;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinebaseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("minecraft-data checkout not found (missing {path})")]
    DataRootMissing { path: PathBuf },

    #[error("minecraft-data checkout not initialized (missing {path})")]
    DataRootUninitialized { path: PathBuf },

    #[error("minecraft-data checkout has no data paths manifest (missing {path})")]
    ManifestMissing { path: PathBuf },

    #[error("Version {version} doesn't exist for edition {edition}")]
    UnknownVersion { version: String, edition: Edition },

    #[error("Unable to load {field:?} for {edition}/{version} (missing {path})")]
    MissingDataFile {
        field: String,
        edition: Edition,
        version: String,
        path: PathBuf,
    },

    #[error("minecraft-data checkout has no common data for the {edition} edition")]
    CommonDataMissing { edition: Edition },

    #[error("Found an unexpected entry in common directory: {path}")]
    UnexpectedCommonEntry { path: PathBuf },

    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    #[error("Validation error at {path}: {message}")]
    ValidationError { path: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    DataSource,
    Network,
    Validation,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a run that failed with this severity; never 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl MinebaseError {
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        MinebaseError::ValidationError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        MinebaseError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        MinebaseError::JsonError {
            path: path.into(),
            source,
        }
    }

    /// Prefixes the path of a validation error with the enclosing field.
    pub fn nested(self, prefix: &str) -> Self {
        match self {
            MinebaseError::ValidationError { path, message } => {
                let path = if path.is_empty() {
                    prefix.to_string()
                } else if path.starts_with('[') {
                    format!("{}{}", prefix, path)
                } else {
                    format!("{}.{}", prefix, path)
                };
                MinebaseError::ValidationError { path, message }
            }
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MinebaseError::ConfigError { .. } | MinebaseError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            MinebaseError::DataRootMissing { .. }
            | MinebaseError::DataRootUninitialized { .. }
            | MinebaseError::ManifestMissing { .. }
            | MinebaseError::UnknownVersion { .. }
            | MinebaseError::MissingDataFile { .. }
            | MinebaseError::CommonDataMissing { .. }
            | MinebaseError::UnexpectedCommonEntry { .. } => ErrorCategory::DataSource,
            MinebaseError::HttpError(_) => ErrorCategory::Network,
            MinebaseError::JsonError { .. }
            | MinebaseError::IntegrityError { .. }
            | MinebaseError::ValidationError { .. } => ErrorCategory::Validation,
            MinebaseError::SerializationError(_)
            | MinebaseError::CsvError(_)
            | MinebaseError::ZipError(_)
            | MinebaseError::ProcessingError { .. } => ErrorCategory::Processing,
            MinebaseError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::DataSource => ErrorSeverity::High,
            ErrorCategory::Validation | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MinebaseError::DataRootMissing { .. } => {
                "Run `minebase fetch` or point --data-dir at a minecraft-data checkout"
            }
            MinebaseError::DataRootUninitialized { .. } => {
                "The checkout has no data directory; clone it recursively or run `minebase fetch`"
            }
            MinebaseError::ManifestMissing { .. } => {
                "The checkout looks incomplete; run `minebase fetch` to refresh it"
            }
            MinebaseError::UnknownVersion { .. } => {
                "Run `minebase versions` to list the versions available for the edition"
            }
            MinebaseError::MissingDataFile { .. } | MinebaseError::UnexpectedCommonEntry { .. } => {
                "The checkout is inconsistent with its manifest; refresh it with `minebase fetch`"
            }
            MinebaseError::CommonDataMissing { .. } => "Check that the edition name is correct",
            MinebaseError::IntegrityError { .. } => {
                "Adjust the manifest-only versions in the [integrity] section of minebase.toml"
            }
            MinebaseError::JsonError { .. } | MinebaseError::ValidationError { .. } => {
                "The upstream data violates the expected schema; report it or pin an older checkout"
            }
            MinebaseError::HttpError(_) => "Check the network connection and the fetch URL",
            MinebaseError::ConfigError { .. } | MinebaseError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            MinebaseError::IoError(_) => "Check file permissions and available disk space",
            MinebaseError::ZipError(_) => "The downloaded archive is corrupt; retry the fetch",
            MinebaseError::SerializationError(_)
            | MinebaseError::CsvError(_)
            | MinebaseError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::DataSource => format!("Data source problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Validation => format!("Invalid data: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MinebaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_prefixes_validation_path() {
        let err = MinebaseError::validation("emitLight", "out of range").nested("blocks[3]");
        match err {
            MinebaseError::ValidationError { path, .. } => assert_eq!(path, "blocks[3].emitLight"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = MinebaseError::validation("[0]", "bad").nested("drops");
        match err {
            MinebaseError::ValidationError { path, .. } => assert_eq!(path, "drops[0]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_severity_and_category() {
        let err = MinebaseError::UnknownVersion {
            version: "0.0".to_string(),
            edition: Edition::Pc,
        };
        assert_eq!(err.category(), ErrorCategory::DataSource);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("0.0"));

        let io = MinebaseError::IoError(std::io::Error::other("boom"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.severity().exit_code(), 3);
    }
}
