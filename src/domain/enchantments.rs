use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_unique, Validate};
use serde::{Deserialize, Serialize};

/// Coefficients of the cost equation `a * level + b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnchantmentCost {
    pub a: i64,
    pub b: i64,
}

impl EnchantmentCost {
    pub fn at_level(&self, level: u32) -> i64 {
        self.a * i64::from(level) + self.b
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnchantmentData {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub max_level: u32,
    pub min_cost: EnchantmentCost,
    pub max_cost: EnchantmentCost,
    /// Category of enchantable items.
    pub category: String,
    /// Rarity weight.
    pub weight: u32,
    pub treasure_only: bool,
    pub curse: bool,
    pub tradeable: bool,
    pub discoverable: bool,
    /// Names of incompatible enchantments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl EnchantmentData {
    pub fn is_compatible_with(&self, other: &str) -> bool {
        other != self.name
            && !self
                .exclude
                .as_ref()
                .is_some_and(|names| names.iter().any(|n| n == other))
    }
}

impl Validate for EnchantmentData {
    fn validate(&self) -> Result<()> {
        validate_range("maxLevel", self.max_level, 1, 5)?;
        validate_range("weight", self.weight, 1, 10)?;
        if let Some(exclude) = &self.exclude {
            validate_unique("exclude", exclude)?;
        }
        Ok(())
    }
}
