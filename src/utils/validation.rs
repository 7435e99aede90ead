use crate::utils::error::{MinebaseError, Result};
use std::collections::HashSet;
use std::hash::Hash;
use url::Url;

/// Checks the constraints serde cannot express on its own.
///
/// Implementations report the offending field relative to `self`; callers
/// nest the path as they recurse (see [`validate_each`]).
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        validate_each("", self)
    }
}

/// Validates every element, tagging failures with `field[index]`.
pub fn validate_each<T: Validate>(field: &str, items: &[T]) -> Result<()> {
    for (idx, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|e| e.nested(&format!("{}[{}]", field, idx)))?;
    }
    Ok(())
}

/// Validates a nested value, tagging failures with `field`.
pub fn validate_field<T: Validate>(field: &str, value: &T) -> Result<()> {
    value.validate().map_err(|e| e.nested(field))
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MinebaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MinebaseError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MinebaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MinebaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MinebaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(MinebaseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MinebaseError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MinebaseError::validation(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

pub fn validate_min<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
) -> Result<()> {
    if value < min {
        return Err(MinebaseError::validation(
            field_name,
            format!("Value {} must be at least {}", value, min),
        ));
    }
    Ok(())
}

pub fn validate_opt_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<()> {
    match value {
        Some(v) => validate_range(field_name, v, min, max),
        None => Ok(()),
    }
}

pub fn validate_opt_min<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: Option<T>,
    min: T,
) -> Result<()> {
    match value {
        Some(v) => validate_min(field_name, v, min),
        None => Ok(()),
    }
}

pub fn validate_min_len<T>(field_name: &str, items: &[T], min_len: usize) -> Result<()> {
    if items.len() < min_len {
        return Err(MinebaseError::validation(
            field_name,
            format!("Expected at least {} element(s), got {}", min_len, items.len()),
        ));
    }
    Ok(())
}

pub fn validate_unique<T: Eq + Hash + std::fmt::Debug>(field_name: &str, items: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item) {
            return Err(MinebaseError::validation(
                field_name,
                format!("List items must be unique (duplicate {:?})", item),
            ));
        }
    }
    Ok(())
}
