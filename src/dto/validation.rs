//! Validation helpers for DTOs.

use validator::ValidationError;

/// Minimum length of a team name after trimming.
const MIN_TEAM_NAME_LEN: usize = 2;
/// Validates that a team name has at least two visible characters.
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_TEAM_NAME_LEN {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some(
            format!("Team name must contain at least {MIN_TEAM_NAME_LEN} characters").into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_team_name_valid() {
        assert!(validate_team_name("FC").is_ok());
        assert!(validate_team_name("Red Star 93").is_ok());
    }

    #[test]
    fn test_validate_team_name_invalid() {
        assert!(validate_team_name("").is_err());
        assert!(validate_team_name("A").is_err());
        assert!(validate_team_name("  A  ").is_err()); // whitespace does not count
    }
}
