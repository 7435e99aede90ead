use crate::utils::error::Result;
use crate::utils::validation::{validate_min, validate_range, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FoodVariation {
    pub metadata: u32,
    pub display_name: String,
}

/// Minecraft-Data for a food item. `id` is the item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FoodData {
    pub id: u32,
    pub display_name: String,
    pub name: String,
    pub stack_size: u32,
    /// Hunger points restored.
    pub food_points: f64,
    pub saturation: f64,
    /// The saturation modifier in game code.
    pub saturation_ratio: f64,
    /// `food_points + saturation`.
    pub effective_quality: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<FoodVariation>>,
}

impl Validate for FoodData {
    fn validate(&self) -> Result<()> {
        validate_range("stackSize", self.stack_size, 1, 64)?;
        validate_min("foodPoints", self.food_points, 0.0)?;
        validate_min("saturation", self.saturation, 0.0)?;
        validate_min("saturationRatio", self.saturation_ratio, 0.0)?;
        validate_min("effectiveQuality", self.effective_quality, 0.0)
    }
}
