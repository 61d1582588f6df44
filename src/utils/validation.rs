use crate::domain::model::Hole;
use crate::utils::error::{LeagueError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LeagueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LeagueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LeagueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LeagueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(LeagueError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_hole(field_name: &str, hole: Hole, total_holes: u32) -> Result<()> {
    if hole == 0 || hole > total_holes {
        return Err(LeagueError::InvalidHoleRange {
            field: field_name.to_string(),
            hole,
            total_holes,
        });
    }
    Ok(())
}

pub fn validate_holes(field_name: &str, holes: &[Hole], total_holes: u32) -> Result<()> {
    holes
        .iter()
        .try_for_each(|&hole| validate_hole(field_name, hole, total_holes))
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(LeagueError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hole() {
        assert!(validate_hole("ctp.holes", 1, 24).is_ok());
        assert!(validate_hole("ctp.holes", 24, 24).is_ok());
        assert!(matches!(
            validate_hole("ctp.holes", 0, 24),
            Err(LeagueError::InvalidHoleRange { hole: 0, .. })
        ));
        assert!(validate_hole("ctp.holes", 25, 24).is_err());
        assert!(validate_holes("ctp.holes", &[3, 4, 30], 24).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("course.total_holes", 18, 1).is_ok());
        assert!(validate_positive_number("course.total_holes", 0, 1).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["csv".to_string(), "text".to_string()];
        assert!(validate_allowed_values("output.formats", &formats, &["csv", "json", "text"]).is_ok());

        let invalid = vec!["html".to_string()];
        assert!(validate_allowed_values("output.formats", &invalid, &["csv", "json", "text"]).is_err());
    }

    #[test]
    fn test_validate_range_and_strings() {
        assert!(validate_range("tags.max_tag", 75, 1, 999).is_ok());
        assert!(validate_range("tags.max_tag", 0, 1, 999).is_err());
        assert!(validate_non_empty_string("league.name", "  ").is_err());
    }
}
