use crate::utils::error::Result;
use crate::utils::validation::{validate_each, validate_opt_range, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlockItemDrop {
    pub item: String,
    /// Bedrock only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<u32>,
    /// Percent chance of the drop.
    pub drop_chance: f64,
    /// `[min, max]`, either bound may be null.
    pub stack_size_range: (Option<i64>, Option<i64>),
    /// Required block age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silk_touch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_silk_touch: Option<bool>,
}

impl Validate for BlockItemDrop {
    fn validate(&self) -> Result<()> {
        validate_opt_range("metadata", self.metadata, 0, 127)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockLootData {
    pub block: String,
    /// Bedrock block states, kept as found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<serde_json::Value>,
    pub drops: Vec<BlockItemDrop>,
}

impl BlockLootData {
    pub fn drops_without_silk_touch(&self) -> impl Iterator<Item = &BlockItemDrop> {
        self.drops.iter().filter(|d| d.silk_touch != Some(true))
    }
}

impl Validate for BlockLootData {
    fn validate(&self) -> Result<()> {
        validate_each("drops", &self.drops)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntityItemDrop {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<u32>,
    pub drop_chance: f64,
    pub stack_size_range: (i64, i64),
    /// Whether the entity must be killed by a player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_kill: Option<bool>,
}

impl Validate for EntityItemDrop {
    fn validate(&self) -> Result<()> {
        validate_opt_range("metadata", self.metadata, 0, 127)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityLootData {
    pub entity: String,
    pub drops: Vec<EntityItemDrop>,
}

impl Validate for EntityLootData {
    fn validate(&self) -> Result<()> {
        validate_each("drops", &self.drops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_loot_open_ranges() {
        let loot: BlockLootData = serde_json::from_value(json!({
            "block": "grass_block",
            "drops": [
                {"item": "dirt", "dropChance": 1, "stackSizeRange": [1, null], "noSilkTouch": true},
                {"item": "grass_block", "dropChance": 1, "stackSizeRange": [1, 1], "silkTouch": true}
            ]
        }))
        .unwrap();
        assert!(loot.validate().is_ok());
        assert_eq!(loot.drops[0].stack_size_range, (Some(1), None));
        assert_eq!(loot.drops_without_silk_touch().count(), 1);
    }

    #[test]
    fn test_loot_metadata_range() {
        let loot: EntityLootData = serde_json::from_value(json!({
            "entity": "sheep",
            "drops": [{"item": "white_wool", "metadata": 128, "dropChance": 1, "stackSizeRange": [1, 1]}]
        }))
        .unwrap();
        assert!(loot.validate().is_err());
    }
}
