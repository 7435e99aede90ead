//! Reads a minecraft-data checkout from disk.
//!
//! The checkout layout is `<root>/data/dataPaths.json` (which directory holds
//! each field of each version), `<root>/data/<edition>/common/*.json` and the
//! per-version `<field>.json` files.

use crate::config::toml_config::IntegrityConfig;
use crate::domain::common::CommonData;
use crate::domain::data_paths::{DataPaths, VersionManifest};
use crate::domain::edition::Edition;
use crate::domain::mcdata::{BedrockMinecraftData, MinecraftData, PcMinecraftData};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Fields listed in the manifest that are not JSON (`proto.yml`, `types.yml`).
const SKIPPED_FIELDS: [&str; 2] = ["proto", "types"];

const DATA_PATHS_FILE: &str = "dataPaths.json";

#[derive(Debug, Clone)]
pub struct DataRoot {
    root: PathBuf,
    manifest_only: HashMap<Edition, Vec<String>>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    tracing::debug!("Reading {}", path.display());
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| MinebaseError::json(path, e))
}

impl DataRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let integrity = IntegrityConfig::default();
        let mut manifest_only = HashMap::new();
        manifest_only.insert(Edition::Pc, integrity.pc_manifest_only);
        manifest_only.insert(Edition::Bedrock, integrity.bedrock_manifest_only);
        Self {
            root: root.into(),
            manifest_only,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut data_root = Self::new(config.data_dir());
        for edition in Edition::ALL {
            data_root = data_root
                .with_manifest_only(edition, config.manifest_only_versions(edition).to_vec());
        }
        data_root
    }

    /// Replaces the versions expected in the manifest but not in the common data.
    pub fn with_manifest_only(mut self, edition: Edition, versions: Vec<String>) -> Self {
        self.manifest_only.insert(edition, versions);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn validate_data(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(MinebaseError::DataRootMissing {
                path: self.root.clone(),
            });
        }
        let data_dir = self.data_dir();
        if !data_dir.is_dir() {
            return Err(MinebaseError::DataRootUninitialized { path: data_dir });
        }
        Ok(())
    }

    pub fn load_data_paths(&self) -> Result<DataPaths> {
        self.validate_data()?;
        let path = self.data_dir().join(DATA_PATHS_FILE);
        if !path.is_file() {
            return Err(MinebaseError::ManifestMissing { path });
        }
        read_json(&path)
    }

    pub fn load_version_manifest(&self, version: &str, edition: Edition) -> Result<VersionManifest> {
        let data_paths = self.load_data_paths()?;
        Self::version_manifest(&data_paths, version, edition).cloned()
    }

    fn version_manifest<'a>(
        data_paths: &'a DataPaths,
        version: &str,
        edition: Edition,
    ) -> Result<&'a VersionManifest> {
        data_paths
            .version(edition, version)
            .ok_or_else(|| MinebaseError::UnknownVersion {
                version: version.to_string(),
                edition,
            })
    }

    pub fn load_common_data(&self, edition: Edition) -> Result<CommonData> {
        self.validate_data()?;
        let common_dir = self.data_dir().join(edition.as_str()).join("common");
        if !common_dir.is_dir() {
            return Err(MinebaseError::CommonDataMissing { edition });
        }

        let mut entries = fs::read_dir(&common_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        let mut fields = Map::new();
        for path in entries {
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let stem = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
            match stem {
                Some(field) if is_json && path.is_file() => {
                    fields.insert(field, read_json::<Value>(&path)?);
                }
                _ => return Err(MinebaseError::UnexpectedCommonEntry { path }),
            }
        }

        let common: CommonData = serde_json::from_value(Value::Object(fields))
            .map_err(|e| MinebaseError::json(&common_dir, e))?;
        common.validate()?;
        Ok(common)
    }

    /// Versions of an edition in release order, checked against the manifest.
    pub fn supported_versions(&self, edition: Edition) -> Result<Vec<String>> {
        let common = self.load_common_data(edition)?;
        let data_paths = self.load_data_paths()?;
        self.check_versions(&data_paths, &common, edition)?;
        Ok(common.versions)
    }

    pub(crate) fn check_versions(
        &self,
        data_paths: &DataPaths,
        common: &CommonData,
        edition: Edition,
    ) -> Result<()> {
        let listed: BTreeSet<&str> = common.versions.iter().map(String::as_str).collect();
        if listed.len() != common.versions.len() {
            return Err(MinebaseError::IntegrityError {
                message: format!("{} common versions contain duplicates", edition),
            });
        }

        let mut expected: BTreeSet<&str> =
            data_paths.edition(edition).keys().map(String::as_str).collect();
        if let Some(manifest_only) = self.manifest_only.get(&edition) {
            for version in manifest_only {
                expected.remove(version.as_str());
            }
        }

        if listed != expected {
            let unlisted: Vec<_> = expected.difference(&listed).collect();
            let unmapped: Vec<_> = listed.difference(&expected).collect();
            return Err(MinebaseError::IntegrityError {
                message: format!(
                    "{} versions don't match the data paths manifest (only in manifest: {:?}, only in common data: {:?})",
                    edition, unlisted, unmapped
                ),
            });
        }
        Ok(())
    }

    pub fn load_version(&self, version: &str, edition: Edition) -> Result<MinecraftData> {
        let data_paths = self.load_data_paths()?;
        self.load_version_with(&data_paths, version, edition)
    }

    /// Like [`DataRoot::load_version`] with an already loaded manifest.
    pub fn load_version_with(
        &self,
        data_paths: &DataPaths,
        version: &str,
        edition: Edition,
    ) -> Result<MinecraftData> {
        self.validate_data()?;
        let manifest = Self::version_manifest(data_paths, version, edition)?;
        let fields = self.read_version_fields(manifest, version, edition)?;
        let file_count = fields.len();
        let origin = self.data_dir().join(edition.as_str()).join(version);

        let data = match edition {
            Edition::Pc => MinecraftData::Pc(
                serde_json::from_value::<PcMinecraftData>(Value::Object(fields))
                    .map_err(|e| MinebaseError::json(&origin, e))?,
            ),
            Edition::Bedrock => MinecraftData::Bedrock(
                serde_json::from_value::<BedrockMinecraftData>(Value::Object(fields))
                    .map_err(|e| MinebaseError::json(&origin, e))?,
            ),
        };
        data.validate()?;

        tracing::info!("Loaded {} {} ({} files)", edition, version, file_count);
        Ok(data)
    }

    fn read_version_fields(
        &self,
        manifest: &VersionManifest,
        version: &str,
        edition: Edition,
    ) -> Result<Map<String, Value>> {
        let data_dir = self.data_dir();
        let mut fields = Map::new();

        for (field, dir) in manifest {
            if SKIPPED_FIELDS.contains(&field.as_str()) {
                continue;
            }
            let path = data_dir.join(dir).join(format!("{}.json", field));
            if !path.is_file() {
                return Err(MinebaseError::MissingDataFile {
                    field: field.clone(),
                    edition,
                    version: version.to_string(),
                    path,
                });
            }
            fields.insert(field.clone(), read_json::<Value>(&path)?);
        }
        Ok(fields)
    }

    pub fn load_pc(&self, version: &str) -> Result<PcMinecraftData> {
        match self.load_version(version, Edition::Pc)? {
            MinecraftData::Pc(data) => Ok(data),
            MinecraftData::Bedrock(_) => Err(MinebaseError::processing(
                "Loaded bedrock data for a pc version",
            )),
        }
    }

    pub fn load_bedrock(&self, version: &str) -> Result<BedrockMinecraftData> {
        match self.load_version(version, Edition::Bedrock)? {
            MinecraftData::Bedrock(data) => Ok(data),
            MinecraftData::Pc(_) => Err(MinebaseError::processing(
                "Loaded pc data for a bedrock version",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, value: &Value) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, serde_json::to_vec(value).unwrap()).unwrap();
    }

    fn common_files(root: &Path, edition: &str, versions: &[&str]) {
        let base = format!("data/{}/common", edition);
        write(root, &format!("{}/legacy.json", base), &json!({"blocks": {}, "items": {}}));
        write(root, &format!("{}/versions.json", base), &json!(versions));
        write(root, &format!("{}/features.json", base), &json!([]));
        write(root, &format!("{}/protocolVersions.json", base), &json!([]));
    }

    fn checkout(pc_manifest: &[&str], pc_common: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        let pc: Map<String, Value> = pc_manifest
            .iter()
            .map(|v| (v.to_string(), json!({"version": format!("pc/{}", v)})))
            .collect();
        write(
            dir.path(),
            "data/dataPaths.json",
            &json!({"pc": pc, "bedrock": {}}),
        );
        common_files(dir.path(), "pc", pc_common);
        common_files(dir.path(), "bedrock", &[]);
        dir
    }

    #[test]
    fn test_missing_root_and_data_dir() {
        let dir = TempDir::new().unwrap();
        let missing = DataRoot::new(dir.path().join("nope"));
        assert!(matches!(
            missing.validate_data(),
            Err(MinebaseError::DataRootMissing { .. })
        ));

        let empty = DataRoot::new(dir.path());
        assert!(matches!(
            empty.validate_data(),
            Err(MinebaseError::DataRootUninitialized { .. })
        ));
    }

    #[test]
    fn test_manifest_missing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        assert!(matches!(
            DataRoot::new(dir.path()).load_data_paths(),
            Err(MinebaseError::ManifestMissing { .. })
        ));
    }

    #[test]
    fn test_unknown_version() {
        let dir = checkout(&["1.8"], &["1.8"]);
        let root = DataRoot::new(dir.path());
        assert!(root.load_version_manifest("1.8", Edition::Pc).is_ok());
        match root.load_version_manifest("9.9", Edition::Pc).unwrap_err() {
            MinebaseError::UnknownVersion { version, edition } => {
                assert_eq!(version, "9.9");
                assert_eq!(edition, Edition::Pc);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_manifest_only_versions_are_tolerated() {
        let dir = checkout(&["1.8", "1.21"], &["1.8"]);
        let root = DataRoot::new(dir.path());
        assert_eq!(root.supported_versions(Edition::Pc).unwrap(), vec!["1.8"]);
        assert!(root.supported_versions(Edition::Bedrock).unwrap().is_empty());
    }

    #[test]
    fn test_integrity_mismatch() {
        let dir = checkout(&["1.8", "1.9"], &["1.8"]);
        let root = DataRoot::new(dir.path());
        assert!(matches!(
            root.supported_versions(Edition::Pc),
            Err(MinebaseError::IntegrityError { .. })
        ));

        let root = root.with_manifest_only(Edition::Pc, vec!["1.9".to_string()]);
        assert!(root.supported_versions(Edition::Pc).is_ok());
    }

    #[test]
    fn test_duplicate_common_versions() {
        let dir = checkout(&["1.8"], &["1.8", "1.8"]);
        assert!(matches!(
            DataRoot::new(dir.path()).supported_versions(Edition::Pc),
            Err(MinebaseError::IntegrityError { .. })
        ));
    }

    #[test]
    fn test_unexpected_common_entry() {
        let dir = checkout(&["1.8"], &["1.8"]);
        fs::write(dir.path().join("data/pc/common/README.md"), "notes").unwrap();
        assert!(matches!(
            DataRoot::new(dir.path()).load_common_data(Edition::Pc),
            Err(MinebaseError::UnexpectedCommonEntry { .. })
        ));
    }

    #[test]
    fn test_common_data_missing() {
        let dir = checkout(&["1.8"], &["1.8"]);
        fs::remove_dir_all(dir.path().join("data/bedrock")).unwrap();
        assert!(matches!(
            DataRoot::new(dir.path()).load_common_data(Edition::Bedrock),
            Err(MinebaseError::CommonDataMissing {
                edition: Edition::Bedrock
            })
        ));
    }

    #[test]
    fn test_missing_data_file() {
        let dir = checkout(&["1.8"], &["1.8"]);
        match DataRoot::new(dir.path())
            .load_version("1.8", Edition::Pc)
            .unwrap_err()
        {
            MinebaseError::MissingDataFile { field, version, .. } => {
                assert_eq!(field, "version");
                assert_eq!(version, "1.8");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let dir = checkout(&["1.8"], &["1.8"]);
        fs::create_dir_all(dir.path().join("data/pc/1.8")).unwrap();
        fs::write(dir.path().join("data/pc/1.8/version.json"), "{not json").unwrap();
        match DataRoot::new(dir.path())
            .load_version("1.8", Edition::Pc)
            .unwrap_err()
        {
            MinebaseError::JsonError { path, .. } => assert!(path.ends_with("version.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
