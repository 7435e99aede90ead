use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available minecraft-data editions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Java edition; minecraft-data calls it `pc`.
    #[cfg_attr(feature = "cli", value(alias = "java"))]
    Pc,
    Bedrock,
}

impl Edition {
    pub const ALL: [Edition; 2] = [Edition::Pc, Edition::Bedrock];

    /// Directory name used by minecraft-data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Pc => "pc",
            Edition::Bedrock => "bedrock",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" | "java" => Ok(Edition::Pc),
            "bedrock" => Ok(Edition::Bedrock),
            other => Err(format!("unknown edition {other:?} (expected pc or bedrock)")),
        }
    }
}
