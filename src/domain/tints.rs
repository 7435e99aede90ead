use crate::utils::error::Result;
use crate::utils::validation::{validate_each, validate_field, validate_min_len, Validate};
use serde::{Deserialize, Serialize};

/// Keys (biome names, block names, power levels) sharing one RGB colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TintEntry<K> {
    pub keys: Vec<K>,
    pub color: i64,
}

impl<K> Validate for TintEntry<K> {
    fn validate(&self) -> Result<()> {
        validate_min_len("keys", &self.keys, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TintGroup<K> {
    pub data: Vec<TintEntry<K>>,
    /// Fallback colour when no key matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
}

impl<K: PartialEq> TintGroup<K> {
    pub fn color_for(&self, key: &K) -> Option<i64> {
        self.data
            .iter()
            .find(|entry| entry.keys.contains(key))
            .map(|entry| entry.color)
            .or(self.default)
    }
}

impl<K> Validate for TintGroup<K> {
    fn validate(&self) -> Result<()> {
        validate_each("data", &self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TintData {
    pub grass: TintGroup<String>,
    pub foliage: TintGroup<String>,
    pub water: TintGroup<String>,
    /// Keyed by signal strength.
    pub redstone: TintGroup<i64>,
    pub constant: TintGroup<String>,
}

impl Validate for TintData {
    fn validate(&self) -> Result<()> {
        // string groups may be empty (pc 1.21.4 ships one)
        validate_field("grass", &self.grass)?;
        validate_field("foliage", &self.foliage)?;
        validate_field("water", &self.water)?;
        validate_field("constant", &self.constant)?;
        validate_min_len("redstone.data", &self.redstone.data, 1)?;
        validate_field("redstone", &self.redstone)
    }
}
