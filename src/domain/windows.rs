use crate::utils::error::Result;
use crate::utils::validation::validate_min_len;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenedWithType {
    Block,
    Item,
    Entity,
}

/// The block, item or entity a window is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowOpenedWithData {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: OpenedWithType,
}

/// A slot, or a slot range when `size` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSlotsData {
    pub name: String,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl WindowSlotsData {
    pub fn contains(&self, slot: u32) -> bool {
        let size = self.size.unwrap_or(1);
        slot >= self.index && slot < self.index + size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WindowData {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<WindowSlotsData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_with: Option<Vec<WindowOpenedWithData>>,
}

impl WindowData {
    pub fn slot_named(&self, slot: u32) -> Option<&str> {
        self.slots
            .as_ref()?
            .iter()
            .find(|s| s.contains(slot))
            .map(|s| s.name.as_str())
    }
}

impl Validate for WindowData {
    fn validate(&self) -> Result<()> {
        if let Some(slots) = &self.slots {
            validate_min_len("slots", slots, 1)?;
        }
        if let Some(properties) = &self.properties {
            validate_min_len("properties", properties, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_window_slots() {
        let window: WindowData = serde_json::from_value(json!({
            "id": "minecraft:furnace",
            "name": "Furnace",
            "slots": [
                {"name": "ingredient", "index": 0},
                {"name": "fuel", "index": 1},
                {"name": "inventory", "index": 3, "size": 36}
            ],
            "properties": ["fuel left", "max fuel", "progress", "max progress"],
            "openedWith": [{"type": "block", "id": 61}]
        }))
        .unwrap();
        assert!(window.validate().is_ok());
        assert_eq!(window.slot_named(1), Some("fuel"));
        assert_eq!(window.slot_named(38), Some("inventory"));
        assert_eq!(window.slot_named(2), None);
    }

    #[test]
    fn test_window_empty_lists_fail() {
        let window: WindowData = serde_json::from_value(json!({
            "id": "minecraft:anvil",
            "name": "Anvil",
            "properties": []
        }))
        .unwrap();
        assert!(window.validate().is_err());
    }
}
