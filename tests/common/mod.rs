#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn write_json(root: &Path, path: &str, value: &Value) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn pc_blocks() -> Value {
    json!([
        {
            "id": 0, "name": "air", "displayName": "Air", "hardness": 0,
            "resistance": 0, "stackSize": 64, "diggable": false, "material": "default",
            "boundingBox": "empty", "transparent": true, "emitLight": 0, "filterLight": 0,
            "minStateId": 0, "maxStateId": 0, "defaultState": 0, "states": [], "drops": []
        },
        {
            "id": 1, "name": "stone", "displayName": "Stone", "hardness": 1.5,
            "resistance": 6, "stackSize": 64, "diggable": true, "material": "mineable/pickaxe",
            "harvestTools": {"702": true}, "boundingBox": "block", "transparent": false,
            "emitLight": 0, "filterLight": 15, "minStateId": 1, "maxStateId": 1,
            "defaultState": 1, "states": [], "drops": [35]
        }
    ])
}

pub fn pc_items() -> Value {
    json!([
        {"id": 1, "name": "stone", "displayName": "Stone", "stackSize": 64},
        {"id": 35, "name": "cobblestone", "displayName": "Cobblestone", "stackSize": 64},
        {
            "id": 702, "name": "wooden_pickaxe", "displayName": "Wooden Pickaxe", "stackSize": 1,
            "maxDurability": 59, "enchantCategories": ["breakable", "digger"],
            "repairWith": ["oak_planks"]
        }
    ])
}

fn common(root: &Path, edition: &str, versions: &[&str]) {
    let base = format!("data/{}/common", edition);
    write_json(root, &format!("{}/legacy.json", base), &json!({"blocks": {"1:0": "minecraft:stone"}, "items": {}}));
    write_json(root, &format!("{}/versions.json", base), &json!(versions));
    write_json(
        root,
        &format!("{}/features.json", base),
        &json!([{"name": "netherUpdate", "description": "1.16 blocks", "versions": ["1.16", "latest"]}]),
    );
    write_json(root, &format!("{}/protocolVersions.json", base), &json!([]));
}

/// A small minecraft-data checkout: pc 1.20.4 and bedrock 1.20.10, plus a pc
/// 1.21 manifest entry that the common versions list omits.
pub fn checkout() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write_json(
        root,
        "data/dataPaths.json",
        &json!({
            "pc": {
                "1.20.4": {
                    "version": "pc/1.20.4",
                    "blocks": "pc/1.20.4",
                    "items": "pc/1.20.4",
                    "protocol": "pc/1.20.4",
                    "proto": "pc/1.20.4"
                },
                "1.21": {"version": "pc/1.21"}
            },
            "bedrock": {
                "1.20.10": {
                    "version": "bedrock/1.20.10",
                    "blocksB2J": "bedrock/1.20.10"
                }
            }
        }),
    );
    common(root, "pc", &["1.20.4"]);
    common(root, "bedrock", &["1.20.10"]);

    write_json(
        root,
        "data/pc/1.20.4/version.json",
        &json!({"version": 765, "minecraftVersion": "1.20.4", "majorVersion": "1.20", "releaseType": "release"}),
    );
    write_json(root, "data/pc/1.20.4/blocks.json", &pc_blocks());
    write_json(root, "data/pc/1.20.4/items.json", &pc_items());
    write_json(
        root,
        "data/pc/1.20.4/protocol.json",
        &json!({
            "types": {"varint": "native", "string": ["pstring", {"countType": "varint"}]},
            "handshaking": {
                "toServer": {
                    "types": {
                        "packet_set_protocol": ["container", [
                            {"name": "protocolVersion", "type": "varint"},
                            {"name": "serverHost", "type": "string"}
                        ]]
                    }
                },
                "toClient": {"types": {}}
            }
        }),
    );

    write_json(
        root,
        "data/bedrock/1.20.10/version.json",
        &json!({"version": 594, "minecraftVersion": "1.20.10", "majorVersion": "1.20"}),
    );
    write_json(
        root,
        "data/bedrock/1.20.10/blocksB2J.json",
        &json!({"minecraft:stone[\"stone_type\":\"stone\"]": "minecraft:stone"}),
    );

    dir
}
