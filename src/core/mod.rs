pub mod commands;
pub mod export;
pub mod fetch;
pub mod loader;
pub mod store;

pub use crate::domain::ports::{ArchiveSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use commands::{ValidationReport, VersionCheck, VersionSummary};
pub use export::{ExportFormat, Exporter};
pub use fetch::{DataFetcher, FetchStamp, HttpArchiveSource};
pub use loader::DataRoot;
pub use store::DataStore;
