use crate::domain::edition::Edition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name (`blocks`, `items`, ...) to the directory holding `<field>.json`,
/// relative to the data directory.
pub type VersionManifest = BTreeMap<String, String>;

/// Structure of the `dataPaths.json` manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataPaths {
    pub pc: BTreeMap<String, VersionManifest>,
    pub bedrock: BTreeMap<String, VersionManifest>,
}

impl DataPaths {
    pub fn edition(&self, edition: Edition) -> &BTreeMap<String, VersionManifest> {
        match edition {
            Edition::Pc => &self.pc,
            Edition::Bedrock => &self.bedrock,
        }
    }

    pub fn version(&self, edition: Edition, version: &str) -> Option<&VersionManifest> {
        self.edition(edition).get(version)
    }
}
