// Domain layer: typed minecraft-data models and ports (interfaces).

pub mod attributes;
pub mod biomes;
pub mod block_states;
pub mod blocks;
pub mod collision;
pub mod commands;
pub mod common;
pub mod data_paths;
pub mod edition;
pub mod enchantments;
pub mod entities;
pub mod foods;
pub mod items;
pub mod loot;
pub mod mcdata;
pub mod ports;
pub mod protocol;
pub mod recipes;
pub mod registries;
pub mod steve;
pub mod tints;
pub mod version;
pub mod windows;
