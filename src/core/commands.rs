//! The work behind the CLI subcommands, kept free of printing so the binary
//! only formats results.

use crate::core::export::{ExportFormat, Exporter};
use crate::core::store::DataStore;
use crate::domain::edition::Edition;
use crate::domain::mcdata::VersionBundle;
use crate::domain::ports::Storage;
use crate::utils::error::{MinebaseError, Result};
use crate::utils::monitor::SystemMonitor;

/// Explicit versions, or every supported version when `all` is set.
pub fn resolve_versions(
    store: &DataStore,
    edition: Edition,
    versions: &[String],
    all: bool,
) -> Result<Vec<String>> {
    if all {
        return store.supported_versions(edition);
    }
    if versions.is_empty() {
        return Err(MinebaseError::ConfigError {
            message: "Name at least one version or pass --all".to_string(),
        });
    }
    Ok(versions.to_vec())
}

#[derive(Debug)]
pub struct VersionCheck {
    pub version: String,
    pub outcome: Result<()>,
}

impl VersionCheck {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug)]
pub struct ValidationReport {
    pub edition: Edition,
    pub checks: Vec<VersionCheck>,
}

impl ValidationReport {
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed()).count()
    }

    /// `Err` naming how many versions failed, when any did.
    pub fn into_result(self) -> Result<()> {
        let failures = self.failures();
        if failures > 0 {
            return Err(MinebaseError::validation(
                self.edition.as_str(),
                format!(
                    "{} of {} versions failed validation",
                    failures,
                    self.checks.len()
                ),
            ));
        }
        Ok(())
    }
}

/// Loads and validates each version in turn, protocol included. A failing
/// version does not stop the rest.
pub fn validate_versions(
    store: &DataStore,
    monitor: &SystemMonitor,
    edition: Edition,
    versions: &[String],
) -> Result<ValidationReport> {
    let data_paths = store.data_paths()?;
    monitor.log_stats("Validation start");

    let mut checks = Vec::with_capacity(versions.len());
    for version in versions {
        // Bypasses the cache; each version is dropped once checked.
        let outcome = store
            .root()
            .load_version_with(&data_paths, version, edition)
            .and_then(|data| data.protocol_data().map(|_| ()));

        if let Err(e) = &outcome {
            tracing::warn!("{} {} failed validation: {}", edition, version, e);
        }
        monitor.log_stats(&format!("Validated {} {}", edition, version));
        checks.push(VersionCheck {
            version: version.clone(),
            outcome,
        });
    }

    Ok(ValidationReport { edition, checks })
}

#[derive(Debug, Clone, PartialEq)]
pub struct VersionSummary {
    pub edition: Edition,
    pub minecraft_version: String,
    pub protocol_version: i64,
    pub major_version: String,
    /// Every dataset the version carries; `None` counts for non-list datasets.
    pub datasets: Vec<(String, Option<usize>)>,
}

pub fn summarize_version(store: &DataStore, edition: Edition, version: &str) -> Result<VersionSummary> {
    let data = store.version(edition, version)?;
    let version_data = data.version_data();
    let exporter = Exporter::new(&data)?;

    Ok(VersionSummary {
        edition,
        minecraft_version: version_data.minecraft_version.clone(),
        protocol_version: version_data.version,
        major_version: version_data.major_version.clone(),
        datasets: exporter
            .datasets()
            .map(|dataset| (dataset.to_string(), exporter.record_count(dataset)))
            .collect(),
    })
}

/// Writes one dataset, or the whole zip bundle, returning the storage path.
pub async fn export<S: Storage>(
    exporter: &Exporter,
    storage: &S,
    dataset: Option<&str>,
    format: ExportFormat,
    bundle: bool,
) -> Result<String> {
    if bundle {
        return exporter.export_bundle(storage).await;
    }
    match dataset {
        Some(dataset) => exporter.write(storage, dataset, format).await,
        None => Err(MinebaseError::ConfigError {
            message: "A dataset name is required unless --bundle is set".to_string(),
        }),
    }
}
