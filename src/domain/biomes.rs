use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{
    validate_each, validate_min_len, validate_opt_range, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

/// Ideal parameter ranges for multi-noise biome generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BiomeClimateData {
    pub temperature: f64,
    pub humidity: f64,
    /// Always 0 in the published data.
    pub altitude: f64,
    /// Terrain "strangeness", also known as ridges.
    pub weirdness: f64,
    pub offset: f64,
}

impl Validate for BiomeClimateData {
    fn validate(&self) -> Result<()> {
        validate_range("temperature", self.temperature, -1.0, 1.0)?;
        validate_range("humidity", self.humidity, -1.0, 1.0)?;
        validate_range("weirdness", self.weirdness, -1.0, 1.0)?;
        if self.altitude != 0.0 {
            return Err(MinebaseError::validation(
                "altitude",
                format!("expected 0, got {}", self.altitude),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precipitation {
    None,
    Rain,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Overworld,
    Nether,
    End,
    /// Bedrock spelling of `end`.
    TheEnd,
}

/// Minecraft-Data about a biome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BiomeData {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub temperature: f64,
    /// Before 1.19.4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<Precipitation>,
    /// 1.19.4 and later. Bedrock 1.21.60 misspells it.
    #[serde(
        rename = "has_precipitation",
        alias = "has_percipitation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub has_precipitation: Option<bool>,
    pub dimension: Dimension,
    pub display_name: String,
    pub color: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<f64>,
    /// Roughly the terrain height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climates: Option<Vec<BiomeClimateData>>,
    #[serde(
        rename = "name_legacy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name_legacy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Id of a variant biome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<u32>,
}

impl BiomeData {
    pub fn has_any_precipitation(&self) -> bool {
        match (self.has_precipitation, self.precipitation) {
            (Some(flag), _) => flag,
            (None, Some(kind)) => kind != Precipitation::None,
            (None, None) => false,
        }
    }
}

impl Validate for BiomeData {
    fn validate(&self) -> Result<()> {
        validate_range("temperature", self.temperature, -1.0, 2.0)?;
        validate_opt_range("rainfall", self.rainfall, 0.0, 1.0)?;
        if let Some(climates) = &self.climates {
            validate_min_len("climates", climates, 1)?;
            validate_each("climates", climates)?;
        }
        Ok(())
    }
}
