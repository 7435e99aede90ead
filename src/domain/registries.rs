//! Small id/name registries: effects, instruments, map icons, particles and
//! sounds.

use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Good,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EffectData {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub kind: EffectType,
}

/// Controls the behavior of a note block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentData {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

/// An icon shown on maps (player indicator, markers, treasure X).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MapIconData {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
    pub visible_in_item_frame: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticleData {
    pub id: u32,
    pub name: String,
}

pub const SOUND_NAMESPACES: [&str; 12] = [
    "block",
    "entity",
    "ambient",
    "item",
    "music",
    "record",
    "ui",
    "weather",
    "music_disc",
    "event",
    "particle",
    "enchant",
];

const EMPTY_SOUND: &str = "intentionally_empty";

/// A sound id and its namespaced name (`block.stone.place`, `music_disc.cat`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundData {
    pub id: i64,
    pub name: String,
}

impl SoundData {
    pub fn namespace(&self) -> Option<&str> {
        self.name.split_once('.').map(|(ns, _)| ns)
    }
}

impl Validate for SoundData {
    fn validate(&self) -> Result<()> {
        if self.name == EMPTY_SOUND {
            return Ok(());
        }
        match self.namespace() {
            None => Err(MinebaseError::validation(
                "name",
                format!("sound name {:?} isn't namespaced", self.name),
            )),
            Some(ns) if !SOUND_NAMESPACES.contains(&ns) => Err(MinebaseError::validation(
                "name",
                format!(
                    "sound name {:?} doesn't belong to any of the expected namespaces",
                    self.name
                ),
            )),
            Some(_) => Ok(()),
        }
    }
}
