use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{
    validate_each, validate_min, validate_opt_min, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundingBox {
    Block,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlockVariationData {
    pub metadata: u32,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStateType {
    Enum,
    Bool,
    Int,
    Direction,
}

/// A Java edition block state property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JavaBlockStateData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BlockStateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    // snake_case in the data, unlike its siblings
    pub num_values: u32,
}

impl Validate for JavaBlockStateData {
    fn validate(&self) -> Result<()> {
        validate_min("num_values", self.num_values, 1)
    }
}

/// The item dropped by a block; the data uses a bare id as shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBlockDropItem")]
pub struct BlockDropItem {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<u32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockDropItemFields {
    id: u32,
    #[serde(default)]
    metadata: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlockDropItem {
    Id(u32),
    Item(BlockDropItemFields),
}

impl From<RawBlockDropItem> for BlockDropItem {
    fn from(raw: RawBlockDropItem) -> Self {
        match raw {
            RawBlockDropItem::Id(id) => BlockDropItem { id, metadata: None },
            RawBlockDropItem::Item(fields) => BlockDropItem {
                id: fields.id,
                metadata: fields.metadata,
            },
        }
    }
}

/// A possible drop of a block.
///
/// `min_count` defaults to 1 and `max_count` to `min_count`. A bare item id
/// stands for a single guaranteed drop of that item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawBlockDrop")]
pub struct BlockDropData {
    pub min_count: f64,
    pub max_count: f64,
    pub drop: BlockDropItem,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct BlockDropFields {
    #[serde(default)]
    min_count: Option<f64>,
    #[serde(default)]
    max_count: Option<f64>,
    drop: BlockDropItem,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlockDrop {
    Id(u32),
    Drop(BlockDropFields),
}

impl From<RawBlockDrop> for BlockDropData {
    fn from(raw: RawBlockDrop) -> Self {
        match raw {
            RawBlockDrop::Id(id) => BlockDropData {
                min_count: 1.0,
                max_count: 1.0,
                drop: BlockDropItem { id, metadata: None },
            },
            RawBlockDrop::Drop(fields) => {
                let min_count = fields.min_count.unwrap_or(1.0);
                BlockDropData {
                    min_count,
                    max_count: fields.max_count.unwrap_or(min_count),
                    drop: fields.drop,
                }
            }
        }
    }
}

impl Validate for BlockDropData {
    fn validate(&self) -> Result<()> {
        validate_min("minCount", self.min_count, 0.0)?;
        validate_min("maxCount", self.max_count, 0.0)?;
        if self.max_count < self.min_count {
            return Err(MinebaseError::validation(
                "maxCount",
                "max_count must be greater than or equal to min_count",
            ));
        }
        Ok(())
    }
}

/// Minecraft-Data for a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlockData {
    pub id: u32,
    /// Unique.
    pub name: String,
    pub display_name: String,
    pub hardness: Option<f64>,
    pub stack_size: u32,
    pub diggable: bool,
    pub bounding_box: BoundingBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Item id of a tool required to harvest the block. Without one the
    /// block still breaks, 3.33x slower, and drops nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harvest_tools: Option<BTreeMap<u32, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<BlockVariationData>>,
    /// Java edition only; Bedrock keeps block states in `blockStates`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<JavaBlockStateData>>,
    pub drops: Vec<BlockDropData>,
    pub transparent: bool,
    pub emit_light: u8,
    pub filter_light: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_state_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_state_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_state: Option<u32>,
    /// Blast resistance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,
}

impl BlockData {
    /// Number of block states, when the state id range is known.
    pub fn state_count(&self) -> Option<u32> {
        match (self.min_state_id, self.max_state_id) {
            (Some(min), Some(max)) if max >= min => Some(max - min + 1),
            _ => None,
        }
    }

    pub fn has_state(&self, state_id: u32) -> bool {
        match (self.min_state_id, self.max_state_id) {
            (Some(min), Some(max)) => (min..=max).contains(&state_id),
            _ => false,
        }
    }

    pub fn can_harvest_with(&self, item_id: Option<u32>) -> bool {
        match (&self.harvest_tools, item_id) {
            (None, _) => true,
            (Some(tools), Some(id)) => tools.get(&id).copied().unwrap_or(false),
            (Some(_), None) => false,
        }
    }
}

impl Validate for BlockData {
    fn validate(&self) -> Result<()> {
        validate_opt_min("hardness", self.hardness, -1.0)?;
        validate_opt_min("resistance", self.resistance, -1.0)?;
        validate_range("emitLight", self.emit_light, 0, 15)?;
        validate_range("filterLight", self.filter_light, 0, 15)?;
        if let Some(states) = &self.states {
            validate_each("states", states)?;
        }
        validate_each("drops", &self.drops)?;
        Ok(())
    }
}
