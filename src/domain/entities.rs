use serde::{Deserialize, Serialize};

/// Semantic entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Blocks,
    Drops,
    Generic,
    #[serde(rename = "Hostile mobs")]
    HostileMobs,
    Immobile,
    #[serde(rename = "NPCs")]
    Npcs,
    #[serde(rename = "Passive mobs")]
    PassiveMobs,
    Projectiles,
    #[serde(rename = "UNKNOWN")]
    Unknown,
    Vehicles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[serde(rename = "")]
    Blank,
    #[serde(rename = "UNKNOWN")]
    Unknown,
    Ambient,
    Animal,
    Hostile,
    Living,
    Mob,
    Object,
    Other,
    Passive,
    Player,
    Projectile,
    WaterCreature,
}

/// Minecraft-Data for an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntityData {
    pub id: u32,
    /// Used in spawn egg metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<u32>,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityCategory>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    /// PC metadata keys, named after the game code with `data_` and `id_`
    /// prefixes stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_keys: Option<Vec<String>>,
}

impl EntityData {
    pub fn is_mob(&self) -> bool {
        matches!(
            self.kind,
            EntityType::Mob
                | EntityType::Hostile
                | EntityType::Passive
                | EntityType::Animal
                | EntityType::Ambient
                | EntityType::WaterCreature
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_enums_use_data_spelling() {
        let entity: EntityData = serde_json::from_value(json!({
            "id": 54,
            "internalId": 54,
            "name": "zombie",
            "displayName": "Zombie",
            "type": "hostile",
            "category": "Hostile mobs",
            "width": 0.6,
            "height": 1.95,
            "metadataKeys": ["is_baby"]
        }))
        .unwrap();
        assert_eq!(entity.kind, EntityType::Hostile);
        assert_eq!(entity.category, Some(EntityCategory::HostileMobs));
        assert!(entity.is_mob());

        let blank: EntityType = serde_json::from_value(json!("")).unwrap();
        assert_eq!(blank, EntityType::Blank);
        let water: EntityType = serde_json::from_value(json!("water_creature")).unwrap();
        assert_eq!(water, EntityType::WaterCreature);
        let npcs: EntityCategory = serde_json::from_value(json!("NPCs")).unwrap();
        assert_eq!(npcs, EntityCategory::Npcs);
        assert!(serde_json::from_value::<EntityType>(json!("boss")).is_err());
    }
}
