use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeData {
    pub name: String,
    /// Mojang name, usually `generic.<name>` or `minecraft:generic.<name>`.
    pub resource: String,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl AttributeData {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Validate for AttributeData {
    fn validate(&self) -> Result<()> {
        if self.min <= self.default && self.default <= self.max {
            return Ok(());
        }
        Err(MinebaseError::validation(
            "default",
            format!(
                "default value {} is outside of the bounds [{}, {}]",
                self.default, self.min, self.max
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_within_bounds() {
        let attribute: AttributeData = serde_json::from_value(serde_json::json!({
            "name": "movementSpeed",
            "resource": "minecraft:generic.movement_speed",
            "default": 0.7,
            "min": 0,
            "max": 1024
        }))
        .unwrap();
        assert!(attribute.validate().is_ok());
        assert_eq!(attribute.clamp(2048.0), 1024.0);

        let broken = AttributeData {
            default: -1.0,
            ..attribute
        };
        assert!(broken.validate().is_err());
    }
}
