use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Release,
    Snapshot,
}

/// Minecraft-Data for a specific Minecraft version (`version.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VersionData {
    /// Protocol version number.
    pub version: i64,
    pub minecraft_version: String,
    pub major_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<ReleaseType>,
}

fn minecraft_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]+\.[0-9]+(\.[0-9]+)?[a-z]?(-pre[0-9]+)?)|([0-9]{2}w[0-9]{2}[a-z])")
            .expect("minecraft version regex must compile")
    })
}

fn major_version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+\.[0-9]+[a-z]?").expect("major version regex must compile"))
}

pub fn is_minecraft_version(value: &str) -> bool {
    minecraft_version_re().is_match(value)
}

pub fn is_major_version(value: &str) -> bool {
    major_version_re().is_match(value)
}

impl Validate for VersionData {
    fn validate(&self) -> Result<()> {
        if !is_minecraft_version(&self.minecraft_version) {
            return Err(MinebaseError::validation(
                "minecraftVersion",
                format!("{:?} is not a Minecraft version", self.minecraft_version),
            ));
        }
        if !is_major_version(&self.major_version) {
            return Err(MinebaseError::validation(
                "majorVersion",
                format!("{:?} is not a major version", self.major_version),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_patterns() {
        assert!(is_minecraft_version("1.20.4"));
        assert!(is_minecraft_version("1.8"));
        assert!(is_minecraft_version("1.14-pre5"));
        assert!(is_minecraft_version("20w14a"));
        assert!(!is_minecraft_version("latest"));

        assert!(is_major_version("1.20"));
        assert!(!is_major_version("one.two"));
    }

    #[test]
    fn test_version_data_parses_and_validates() {
        let data: VersionData = serde_json::from_value(serde_json::json!({
            "version": 765,
            "minecraftVersion": "1.20.4",
            "majorVersion": "1.20",
            "releaseType": "release"
        }))
        .unwrap();
        assert_eq!(data.release_type, Some(ReleaseType::Release));
        assert!(data.validate().is_ok());

        let bad = VersionData {
            minecraft_version: "latest".to_string(),
            ..data
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_version_data_rejects_unknown_fields() {
        let result: std::result::Result<VersionData, _> = serde_json::from_value(serde_json::json!({
            "version": 1,
            "minecraftVersion": "1.8",
            "majorVersion": "1.8",
            "dataVersion": 100
        }));
        assert!(result.is_err());
    }
}
