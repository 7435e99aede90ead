//! Data shared by every version of an edition (`data/<edition>/common/`).

use crate::domain::version::ReleaseType;
use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{validate_each, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Legacy numeric id to name mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyData {
    pub blocks: BTreeMap<String, String>,
    pub items: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Text(String),
}

/// A variant of a feature and the versions it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureValueData {
    pub value: FeatureValue,
    /// Inclusive `(first, last)` version range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Validate for FeatureValueData {
    fn validate(&self) -> Result<()> {
        match (&self.version, &self.versions) {
            (Some(_), Some(_)) => Err(MinebaseError::validation(
                "",
                "Cannot specify both 'version' and 'versions'",
            )),
            (None, None) => Err(MinebaseError::validation(
                "",
                "Must specify either 'version' or 'versions'",
            )),
            _ => Ok(()),
        }
    }
}

/// A feature and the versions in which it is supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureData {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<FeatureValueData>>,
}

impl Validate for FeatureData {
    fn validate(&self) -> Result<()> {
        let provided = [
            self.version.is_some(),
            self.versions.is_some(),
            self.values.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if provided == 0 {
            return Err(MinebaseError::validation(
                "",
                format!(
                    "Feature {:?} must provide exactly one of: 'version', 'versions', or 'values'",
                    self.name
                ),
            ));
        }
        if provided > 1 {
            return Err(MinebaseError::validation(
                "",
                format!(
                    "Feature {:?} cannot provide more than one of: 'version', 'versions', or 'values'",
                    self.name
                ),
            ));
        }
        if let Some(values) = &self.values {
            validate_each("values", values)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProtocolVersionData {
    pub minecraft_version: String,
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<i64>,
    /// PC only; protocol numbers restarted at 0 with the netty rewrite (1.7.2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_netty: Option<bool>,
    pub major_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<ReleaseType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommonData {
    pub legacy: LegacyData,
    /// Ordered by release.
    pub versions: Vec<String>,
    pub features: Vec<FeatureData>,
    pub protocol_versions: Vec<ProtocolVersionData>,
}

impl CommonData {
    pub fn feature(&self, name: &str) -> Option<&FeatureData> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Protocol entries for a Minecraft version (snapshots can share one).
    pub fn protocol_versions_for<'a>(
        &'a self,
        minecraft_version: &'a str,
    ) -> impl Iterator<Item = &'a ProtocolVersionData> + 'a {
        self.protocol_versions
            .iter()
            .filter(move |p| p.minecraft_version == minecraft_version)
    }
}

impl Validate for CommonData {
    fn validate(&self) -> Result<()> {
        validate_each("features", &self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_requires_exactly_one_version_source() {
        let feature: FeatureData = serde_json::from_value(json!({
            "name": "dimensionIsAnInt",
            "description": "description",
            "versions": ["1.8", "1.15.2"]
        }))
        .unwrap();
        assert!(feature.validate().is_ok());

        let both: FeatureData = serde_json::from_value(json!({
            "name": "x",
            "description": "d",
            "version": "1.8",
            "versions": ["1.8", "1.9"]
        }))
        .unwrap();
        assert!(both.validate().is_err());

        let none: FeatureData = serde_json::from_value(json!({
            "name": "x",
            "description": "d"
        }))
        .unwrap();
        assert!(none.validate().is_err());
    }

    #[test]
    fn test_feature_values_are_validated() {
        let feature: FeatureData = serde_json::from_value(json!({
            "name": "metadataIxOfItem",
            "description": "d",
            "values": [
                {"value": 8, "versions": ["1.17", "1.20"]},
                {"value": "slot"}
            ]
        }))
        .unwrap();
        let err = feature.validate().unwrap_err();
        match err {
            MinebaseError::ValidationError { path, .. } => assert_eq!(path, "values[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            feature.values.as_ref().unwrap()[0].value,
            FeatureValue::Int(8)
        );
    }
}
