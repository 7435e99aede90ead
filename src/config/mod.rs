#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::{
    archive_url_for_ref, DataConfig, ExportConfig, FetchConfig, IntegrityConfig, MinebaseConfig,
    MonitoringConfig, DATA_DIR_ENV, DEFAULT_CONFIG_FILE, DEFAULT_DATA_DIR,
};
