use crate::utils::error::Result;
use crate::utils::validation::{validate_each, validate_opt_range, Validate};
use serde::{Deserialize, Serialize};

/// A sub-item distinguished from its parent by metadata (coal 263 has a
/// charcoal variation 263:1). Some variations carry their own id or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemVariationData {
    pub metadata: u32,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchant_categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Validate for ItemVariationData {
    fn validate(&self) -> Result<()> {
        validate_opt_range("stackSize", self.stack_size, 0, 64)
    }
}

/// Minecraft-Data about an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawItemData")]
pub struct ItemData {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub stack_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchant_categories: Option<Vec<String>>,
    /// Item names this item can be combined with in an anvil for repair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_with: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_durability: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<ItemVariationData>>,
    /// Block placed by this item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_state_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawItemData {
    id: u32,
    name: String,
    display_name: String,
    stack_size: u32,
    #[serde(default)]
    enchant_categories: Option<Vec<String>>,
    // bedrock 1.17.10 spells it fixedWith; both at once is a duplicate field
    #[serde(default, alias = "fixedWith")]
    repair_with: Option<Vec<String>>,
    #[serde(default)]
    max_durability: Option<u32>,
    #[serde(default)]
    durability: Option<u32>,
    #[serde(default)]
    variations: Option<Vec<ItemVariationData>>,
    #[serde(default)]
    block_state_id: Option<u32>,
    #[serde(default)]
    metadata: Option<u32>,
}

impl TryFrom<RawItemData> for ItemData {
    type Error = String;

    fn try_from(raw: RawItemData) -> std::result::Result<Self, Self::Error> {
        if let Some(durability) = raw.durability {
            match raw.max_durability {
                None => return Err("found durability field without maxDurability".to_string()),
                Some(max) if max != durability => {
                    return Err(format!(
                        "durability ({durability}) doesn't match maxDurability ({max})"
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(ItemData {
            id: raw.id,
            name: raw.name,
            display_name: raw.display_name,
            stack_size: raw.stack_size,
            enchant_categories: raw.enchant_categories,
            repair_with: raw.repair_with,
            max_durability: raw.max_durability,
            variations: raw.variations,
            block_state_id: raw.block_state_id,
            metadata: raw.metadata,
        })
    }
}

impl ItemData {
    pub fn variation(&self, metadata: u32) -> Option<&ItemVariationData> {
        self.variations
            .as_ref()?
            .iter()
            .find(|v| v.metadata == metadata)
    }

    pub fn can_repair_with(&self, item_name: &str) -> bool {
        self.repair_with
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == item_name))
    }
}

impl Validate for ItemData {
    fn validate(&self) -> Result<()> {
        match &self.variations {
            Some(variations) => validate_each("variations", variations),
            None => Ok(()),
        }
    }
}
