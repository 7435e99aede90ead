//! Per-version data bundles: every `<field>.json` listed for a version in
//! `dataPaths.json`, keyed by field name.

use crate::domain::attributes::AttributeData;
use crate::domain::biomes::BiomeData;
use crate::domain::block_states::{BedrockBlockStateData, BlockMappingData};
use crate::domain::blocks::BlockData;
use crate::domain::collision::BlockCollisionShapes;
use crate::domain::commands::CommandsData;
use crate::domain::edition::Edition;
use crate::domain::enchantments::EnchantmentData;
use crate::domain::entities::EntityData;
use crate::domain::foods::FoodData;
use crate::domain::items::ItemData;
use crate::domain::loot::{BlockLootData, EntityLootData};
use crate::domain::protocol::ProtocolData;
use crate::domain::recipes::{BedrockRecipesData, JavaRecipesData};
use crate::domain::registries::{
    EffectData, InstrumentData, MapIconData, ParticleData, SoundData,
};
use crate::domain::steve::SteveData;
use crate::domain::tints::TintData;
use crate::domain::version::VersionData;
use crate::domain::windows::WindowData;
use crate::utils::error::Result;
use crate::utils::validation::{validate_each, validate_field, Validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Material name to item id to dig speed multiplier.
pub type Materials = BTreeMap<String, BTreeMap<u32, f64>>;

fn validate_list<T: Validate>(field: &str, items: &Option<Vec<T>>) -> Result<()> {
    match items {
        Some(items) => validate_each(field, items),
        None => Ok(()),
    }
}

/// Minecraft-Data for one Java edition version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PcMinecraftData {
    pub version: VersionData,
    pub blocks: Vec<BlockData>,
    /// Kept as JSON; see [`ProtocolData::from_json`].
    pub protocol: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biomes: Option<Vec<BiomeData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchantments: Option<Vec<EnchantmentData>>,
    /// en_US translations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_collision_shapes: Option<BlockCollisionShapes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<InstrumentData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Materials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<EntityData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<EffectData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_loot: Option<Vec<EntityLootData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_loot: Option<Vec<BlockLootData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foods: Option<Vec<FoodData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tints: Option<TintData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_icons: Option<Vec<MapIconData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds: Option<Vec<SoundData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<Vec<ParticleData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_comments: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<CommandsData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_packet: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<JavaRecipesData>,
}

impl Validate for PcMinecraftData {
    fn validate(&self) -> Result<()> {
        validate_field("version", &self.version)?;
        validate_each("blocks", &self.blocks)?;
        validate_list("biomes", &self.biomes)?;
        validate_list("items", &self.items)?;
        validate_list("attributes", &self.attributes)?;
        validate_list("windows", &self.windows)?;
        validate_list("enchantments", &self.enchantments)?;
        validate_field("blockCollisionShapes", &self.block_collision_shapes)?;
        validate_list("entityLoot", &self.entity_loot)?;
        validate_list("blockLoot", &self.block_loot)?;
        validate_list("foods", &self.foods)?;
        validate_field("tints", &self.tints)?;
        validate_list("sounds", &self.sounds)?;
        validate_field("commands", &self.commands)?;
        validate_field("recipes", &self.recipes)
    }
}

/// Minecraft-Data for one Bedrock edition version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BedrockMinecraftData {
    pub version: VersionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biomes: Option<Vec<BiomeData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchantments: Option<Vec<EnchantmentData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_collision_shapes: Option<BlockCollisionShapes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<InstrumentData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Materials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<EntityData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<EffectData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_loot: Option<Vec<EntityLootData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_loot: Option<Vec<BlockLootData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steve: Option<SteveData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_states: Option<Vec<BedrockBlockStateData>>,
    /// Bedrock block state string to Java block state string.
    #[serde(
        default,
        rename = "blocksB2J",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks_b2j: Option<BTreeMap<String, String>>,
    #[serde(
        default,
        rename = "blocksJ2B",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks_j2b: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_mappings: Option<Vec<BlockMappingData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<BedrockRecipesData>,
}

impl Validate for BedrockMinecraftData {
    fn validate(&self) -> Result<()> {
        validate_field("version", &self.version)?;
        validate_list("blocks", &self.blocks)?;
        validate_list("biomes", &self.biomes)?;
        validate_list("items", &self.items)?;
        validate_list("attributes", &self.attributes)?;
        validate_list("windows", &self.windows)?;
        validate_list("enchantments", &self.enchantments)?;
        validate_field("blockCollisionShapes", &self.block_collision_shapes)?;
        validate_list("entityLoot", &self.entity_loot)?;
        validate_list("blockLoot", &self.block_loot)?;
        validate_field("steve", &self.steve)?;
        validate_field("recipes", &self.recipes)
    }
}

/// Read access shared by both editions' bundles.
pub trait VersionBundle {
    fn version_data(&self) -> &VersionData;
    fn blocks(&self) -> &[BlockData];
    fn items(&self) -> &[ItemData];
    fn entities(&self) -> &[EntityData];
    fn biomes(&self) -> &[BiomeData];
    fn protocol_json(&self) -> Option<&Value>;

    fn block_by_name(&self, name: &str) -> Option<&BlockData> {
        self.blocks().iter().find(|b| b.name == name)
    }

    fn block_by_id(&self, id: u32) -> Option<&BlockData> {
        self.blocks().iter().find(|b| b.id == id)
    }

    /// The block owning a state id (Java state ranges).
    fn block_by_state_id(&self, state_id: u32) -> Option<&BlockData> {
        self.blocks().iter().find(|b| b.has_state(state_id))
    }

    fn item_by_name(&self, name: &str) -> Option<&ItemData> {
        self.items().iter().find(|i| i.name == name)
    }

    fn item_by_id(&self, id: u32) -> Option<&ItemData> {
        self.items().iter().find(|i| i.id == id)
    }

    fn entity_by_name(&self, name: &str) -> Option<&EntityData> {
        self.entities().iter().find(|e| e.name == name)
    }

    fn biome_by_name(&self, name: &str) -> Option<&BiomeData> {
        self.biomes().iter().find(|b| b.name == name)
    }

    /// Parses the protocol document, when the version ships one.
    fn protocol_data(&self) -> Result<Option<ProtocolData>> {
        self.protocol_json()
            .map(|raw| ProtocolData::from_json(raw).map_err(|e| e.nested("protocol")))
            .transpose()
    }
}

fn opt_slice<T>(items: &Option<Vec<T>>) -> &[T] {
    items.as_deref().unwrap_or_default()
}

impl VersionBundle for PcMinecraftData {
    fn version_data(&self) -> &VersionData {
        &self.version
    }
    fn blocks(&self) -> &[BlockData] {
        &self.blocks
    }
    fn items(&self) -> &[ItemData] {
        opt_slice(&self.items)
    }
    fn entities(&self) -> &[EntityData] {
        opt_slice(&self.entities)
    }
    fn biomes(&self) -> &[BiomeData] {
        opt_slice(&self.biomes)
    }
    fn protocol_json(&self) -> Option<&Value> {
        Some(&self.protocol)
    }
}

impl VersionBundle for BedrockMinecraftData {
    fn version_data(&self) -> &VersionData {
        &self.version
    }
    fn blocks(&self) -> &[BlockData] {
        opt_slice(&self.blocks)
    }
    fn items(&self) -> &[ItemData] {
        opt_slice(&self.items)
    }
    fn entities(&self) -> &[EntityData] {
        opt_slice(&self.entities)
    }
    fn biomes(&self) -> &[BiomeData] {
        opt_slice(&self.biomes)
    }
    fn protocol_json(&self) -> Option<&Value> {
        self.protocol.as_ref()
    }
}

/// A loaded version of either edition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MinecraftData {
    Pc(PcMinecraftData),
    Bedrock(BedrockMinecraftData),
}

impl MinecraftData {
    pub fn edition(&self) -> Edition {
        match self {
            MinecraftData::Pc(_) => Edition::Pc,
            MinecraftData::Bedrock(_) => Edition::Bedrock,
        }
    }

    pub fn as_pc(&self) -> Option<&PcMinecraftData> {
        match self {
            MinecraftData::Pc(data) => Some(data),
            MinecraftData::Bedrock(_) => None,
        }
    }

    pub fn as_bedrock(&self) -> Option<&BedrockMinecraftData> {
        match self {
            MinecraftData::Bedrock(data) => Some(data),
            MinecraftData::Pc(_) => None,
        }
    }

    fn bundle(&self) -> &dyn VersionBundle {
        match self {
            MinecraftData::Pc(data) => data,
            MinecraftData::Bedrock(data) => data,
        }
    }
}

impl VersionBundle for MinecraftData {
    fn version_data(&self) -> &VersionData {
        self.bundle().version_data()
    }
    fn blocks(&self) -> &[BlockData] {
        self.bundle().blocks()
    }
    fn items(&self) -> &[ItemData] {
        self.bundle().items()
    }
    fn entities(&self) -> &[EntityData] {
        self.bundle().entities()
    }
    fn biomes(&self) -> &[BiomeData] {
        self.bundle().biomes()
    }
    fn protocol_json(&self) -> Option<&Value> {
        self.bundle().protocol_json()
    }
}

impl Validate for MinecraftData {
    fn validate(&self) -> Result<()> {
        match self {
            MinecraftData::Pc(data) => data.validate(),
            MinecraftData::Bedrock(data) => data.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pc_bundle() -> Value {
        json!({
            "version": {"version": 765, "minecraftVersion": "1.20.4", "majorVersion": "1.20"},
            "blocks": [{
                "id": 1, "name": "stone", "displayName": "Stone", "hardness": 1.5,
                "stackSize": 64, "diggable": true, "boundingBox": "block", "drops": [1],
                "transparent": false, "emitLight": 0, "filterLight": 15,
                "minStateId": 1, "maxStateId": 1, "defaultState": 1
            }],
            "items": [{"id": 1, "name": "stone", "displayName": "Stone", "stackSize": 64}],
            "protocol": {"types": {"varint": "native"}},
            "materials": {"mineable/pickaxe": {"702": 2.0}}
        })
    }

    #[test]
    fn test_pc_bundle_lookups() {
        let data: PcMinecraftData = serde_json::from_value(pc_bundle()).unwrap();
        assert!(data.validate().is_ok());
        assert_eq!(data.block_by_name("stone").unwrap().id, 1);
        assert_eq!(data.block_by_state_id(1).unwrap().name, "stone");
        assert_eq!(data.item_by_id(1).unwrap().name, "stone");
        assert!(data.entity_by_name("zombie").is_none());
        assert_eq!(data.materials.as_ref().unwrap()["mineable/pickaxe"][&702], 2.0);

        let protocol = data.protocol_data().unwrap().unwrap();
        assert!(protocol.types.contains_key("varint"));
    }

    #[test]
    fn test_pc_bundle_requires_blocks_and_protocol() {
        let mut value = pc_bundle();
        value.as_object_mut().unwrap().remove("protocol");
        assert!(serde_json::from_value::<PcMinecraftData>(value).is_err());
    }

    #[test]
    fn test_bundle_rejects_unknown_datasets() {
        let mut value = pc_bundle();
        value["blockStates"] = json!([]);
        assert!(serde_json::from_value::<PcMinecraftData>(value).is_err());
    }

    #[test]
    fn test_bedrock_bundle_through_enum() {
        let data: BedrockMinecraftData = serde_json::from_value(json!({
            "version": {"version": 594, "minecraftVersion": "1.20.10", "majorVersion": "1.20"},
            "blocksB2J": {"minecraft:air": "minecraft:air"},
            "biomes": [{
                "id": 1, "name": "plains", "category": "plains", "temperature": 0.8,
                "dimension": "overworld", "displayName": "Plains", "color": 0
            }]
        }))
        .unwrap();
        let data = MinecraftData::Bedrock(data);
        assert_eq!(data.edition(), Edition::Bedrock);
        assert!(data.validate().is_ok());
        assert!(data.blocks().is_empty());
        assert!(data.biome_by_name("plains").is_some());
        assert!(data.protocol_data().unwrap().is_none());
        assert_eq!(data.version_data().minecraft_version, "1.20.10");
    }

    #[test]
    fn test_bundle_validation_paths() {
        let mut value = pc_bundle();
        value["blocks"][0]["filterLight"] = json!(99);
        let data: PcMinecraftData = serde_json::from_value(value).unwrap();
        match data.validate().unwrap_err() {
            crate::utils::error::MinebaseError::ValidationError { path, .. } => {
                assert_eq!(path, "blocks[0].filterLight")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
