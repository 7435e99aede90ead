//! The default Bedrock skin (`steve.json`). Unlike the rest of the data,
//! fields are PascalCase.

use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{validate_each, Validate};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

fn hex_color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // only 1, 6 and 8 digit colours show up in the data (#0 being the 1 digit one)
    RE.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{1}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .expect("hex colour regex must compile")
    })
}

pub fn is_hex_color(value: &str) -> bool {
    hex_color_re().is_match(value)
}

pub fn is_base64(value: &str) -> bool {
    STANDARD.decode(value).is_ok()
}

/// Base64 whose decoded payload is UTF-8 text.
pub fn is_base64_text(value: &str) -> bool {
    STANDARD
        .decode(value)
        .is_ok_and(|bytes| std::str::from_utf8(&bytes).is_ok())
}

fn check_base64(field: &str, value: &str) -> Result<()> {
    if is_base64(value) {
        Ok(())
    } else {
        Err(MinebaseError::validation(field, "value is not valid base64"))
    }
}

fn check_base64_text(field: &str, value: &str) -> Result<()> {
    if is_base64_text(value) {
        Ok(())
    } else {
        Err(MinebaseError::validation(
            field,
            "value is not base64 encoded UTF-8 text",
        ))
    }
}

fn check_hex_color(field: &str, value: &str) -> Result<()> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(MinebaseError::validation(
            field,
            format!("{value:?} is not a #-prefixed 1, 6 or 8 digit hex colour"),
        ))
    }
}

fn check_const<T: PartialEq + std::fmt::Debug>(field: &str, value: &T, expected: &T) -> Result<()> {
    if value == expected {
        Ok(())
    } else {
        Err(MinebaseError::validation(
            field,
            format!("expected {expected:?}, got {value:?}"),
        ))
    }
}

fn check_uuid_v4(field: &str, value: &Uuid) -> Result<()> {
    if value.get_version_num() == 4 {
        Ok(())
    } else {
        Err(MinebaseError::validation(
            field,
            format!("{value} is not a version 4 UUID"),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AnimatedSkinImageData {
    #[serde(rename = "Type")]
    pub kind: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub frames: u32,
    pub animation_expression: u32,
    /// Base64 encoded.
    pub image: String,
}

impl Validate for AnimatedSkinImageData {
    fn validate(&self) -> Result<()> {
        check_const("Type", &self.kind, &1)?;
        check_const("ImageWidth", &self.image_width, &32)?;
        check_const("ImageHeight", &self.image_height, &64)?;
        check_const("Frames", &self.frames, &2)?;
        check_const("AnimationExpression", &self.animation_expression, &1)?;
        check_base64("Image", &self.image)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct SkinPieceTintColorsData {
    pub colors: Vec<String>,
    pub piece_type: String,
}

impl Validate for SkinPieceTintColorsData {
    fn validate(&self) -> Result<()> {
        for (idx, color) in self.colors.iter().enumerate() {
            check_hex_color(&format!("Colors[{idx}]"), color)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct SkinPersonaPiecesData {
    pub is_default: bool,
    pub pack_id: Uuid,
    pub piece_id: Uuid,
    pub piece_type: String,
    pub product_id: String,
}

impl Validate for SkinPersonaPiecesData {
    fn validate(&self) -> Result<()> {
        check_const("IsDefault", &self.is_default, &true)?;
        check_uuid_v4("PackId", &self.pack_id)?;
        check_uuid_v4("PieceId", &self.piece_id)?;
        check_const("ProductId", &self.product_id.as_str(), &"")
    }
}

/// The default Steve skin (Bedrock only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct SteveData {
    pub animated_image_data: Vec<AnimatedSkinImageData>,
    pub arm_size: String,
    pub cape_data: String,
    pub cape_id: String,
    pub cape_image_height: u32,
    pub cape_image_width: u32,
    pub cape_on_classic_skin: bool,
    pub persona_pieces: Vec<SkinPersonaPiecesData>,
    pub persona_skin: bool,
    pub piece_tint_colors: Vec<SkinPieceTintColorsData>,
    pub premium_skin: bool,
    pub skin_animation_data: String,
    pub skin_color: String,
    pub skin_id: String,
    pub skin_image_height: u32,
    pub skin_image_width: u32,
    pub skin_resource_patch: String,
    pub skin_data: String,
    pub skin_geometry_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_geometry_engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_geometry_data_engine_version: Option<String>,
}

impl Validate for SteveData {
    fn validate(&self) -> Result<()> {
        validate_each("AnimatedImageData", &self.animated_image_data)?;
        check_const("ArmSize", &self.arm_size.as_str(), &"wide")?;
        check_const("CapeData", &self.cape_data.as_str(), &"")?;
        check_const("CapeId", &self.cape_id.as_str(), &"")?;
        check_const("CapeImageHeight", &self.cape_image_height, &0)?;
        check_const("CapeImageWidth", &self.cape_image_width, &0)?;
        check_const("CapeOnClassicSkin", &self.cape_on_classic_skin, &false)?;
        validate_each("PersonaPieces", &self.persona_pieces)?;
        check_const("PersonaSkin", &self.persona_skin, &true)?;
        validate_each("PieceTintColors", &self.piece_tint_colors)?;
        check_const("PremiumSkin", &self.premium_skin, &false)?;
        check_const("SkinAnimationData", &self.skin_animation_data.as_str(), &"")?;
        check_hex_color("SkinColor", &self.skin_color)?;
        check_const("SkinImageHeight", &self.skin_image_height, &256)?;
        check_const("SkinImageWidth", &self.skin_image_width, &256)?;
        check_base64_text("SkinResourcePatch", &self.skin_resource_patch)?;
        check_base64("SkinData", &self.skin_data)?;
        check_base64_text("SkinGeometryData", &self.skin_geometry_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn steve() -> serde_json::Value {
        json!({
            "AnimatedImageData": [{
                "Type": 1, "ImageWidth": 32, "ImageHeight": 64, "Frames": 2,
                "AnimationExpression": 1, "Image": "AAAA"
            }],
            "ArmSize": "wide",
            "CapeData": "",
            "CapeId": "",
            "CapeImageHeight": 0,
            "CapeImageWidth": 0,
            "CapeOnClassicSkin": false,
            "PersonaPieces": [{
                "IsDefault": true,
                "PackId": "d8ba45b6-eb12-4f04-9a1c-0d4b3e8b0b8e",
                "PieceId": "6e1d3d0c-1c3c-4f57-8c3e-4c1c1b7c8a2f",
                "PieceType": "persona_skeleton",
                "ProductId": ""
            }],
            "PersonaSkin": true,
            "PieceTintColors": [{
                "Colors": ["#0", "#ffcc9966", "#ffffff", "#0"],
                "PieceType": "persona_eyes"
            }],
            "PremiumSkin": false,
            "SkinAnimationData": "",
            "SkinColor": "#b37b62",
            "SkinId": "c18e65aa-7b21-4637-9b63-8ad63622ef01.persona-e199672a8c1a87e0-0",
            "SkinImageHeight": 256,
            "SkinImageWidth": 256,
            "SkinResourcePatch": "eyJnZW9tZXRyeSI6e319",
            "SkinData": "AAAAAA==",
            "SkinGeometryData": "bnVsbA=="
        })
    }

    #[test]
    fn test_steve_parses_and_validates() {
        let data: SteveData = serde_json::from_value(steve()).unwrap();
        data.validate().unwrap();
    }

    #[test]
    fn test_steve_constants_are_enforced() {
        let mut value = steve();
        value["ArmSize"] = json!("slim");
        let data: SteveData = serde_json::from_value(value).unwrap();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_persona_piece_requires_v4_uuid() {
        let mut value = steve();
        value["PersonaPieces"][0]["PieceId"] = json!("6e1d3d0c-1c3c-1f57-8c3e-4c1c1b7c8a2f");
        let data: SteveData = serde_json::from_value(value).unwrap();
        match data.validate().unwrap_err() {
            MinebaseError::ValidationError { path, .. } => {
                assert_eq!(path, "PersonaPieces[0].PieceId")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_geometry_must_decode_to_text() {
        let mut value = steve();
        value["SkinData"] = json!("/w==");
        let data: SteveData = serde_json::from_value(value.clone()).unwrap();
        data.validate().unwrap();

        value["SkinGeometryData"] = json!("/w==");
        let data: SteveData = serde_json::from_value(value).unwrap();
        match data.validate().unwrap_err() {
            MinebaseError::ValidationError { path, .. } => assert_eq!(path, "SkinGeometryData"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_colour_and_base64_checks() {
        assert!(is_hex_color("#0"));
        assert!(is_hex_color("#a1b2c3"));
        assert!(!is_hex_color("#abc"));
        assert!(!is_hex_color("ffffff"));

        assert!(is_base64("bnVsbA=="));
        assert!(!is_base64("bnVsbA="));
        assert!(!is_base64("not base64!"));

        // "/w==" is the single byte 0xff
        assert!(is_base64("/w=="));
        assert!(!is_base64_text("/w=="));
        assert!(is_base64_text("bnVsbA=="));
    }
}
