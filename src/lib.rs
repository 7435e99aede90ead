//! Typed, validated bindings over the [minecraft-data] dataset.
//!
//! [minecraft-data]: https://github.com/PrismarineJS/minecraft-data

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::MinebaseConfig;

pub use core::{DataFetcher, DataRoot, DataStore, ExportFormat, Exporter, HttpArchiveSource};
pub use domain::edition::Edition;
pub use domain::mcdata::{BedrockMinecraftData, MinecraftData, PcMinecraftData, VersionBundle};
pub use utils::error::{MinebaseError, Result};
