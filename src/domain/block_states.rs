//! Bedrock block states and the Java/Bedrock block mapping tables.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A Bedrock block state value as tagged in the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "value",
    rename_all = "lowercase",
    deny_unknown_fields
)]
pub enum BedrockStateValue {
    String(String),
    Byte(u8),
    Int(i32),
}

impl BedrockStateValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BedrockStateValue::Byte(v) => Some(i64::from(*v)),
            BedrockStateValue::Int(v) => Some(i64::from(*v)),
            BedrockStateValue::String(_) => None,
        }
    }
}

/// A Bedrock block state permutation. Java keeps its states on the blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BedrockBlockStateData {
    pub name: String,
    pub states: BTreeMap<String, BedrockStateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// One side of a block mapping. The state values vary too much between
/// blocks to type them, so they stay as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockMappingEditionData {
    pub name: String,
    pub states: Map<String, Value>,
}

/// How a Bedrock block maps onto the corresponding Java block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockMappingData {
    pub pc: BlockMappingEditionData,
    pub pe: BlockMappingEditionData,
}
