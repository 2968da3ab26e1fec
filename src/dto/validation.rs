//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a username is 3 to 16 characters of ASCII letters, digits,
/// or underscores, matching the Minecraft account rules.
///
/// # Examples
///
/// ```ignore
/// validate_minecraft_username("Axolotl1212") // Ok
/// validate_minecraft_username("ab")          // Err - too short
/// validate_minecraft_username("sv.matteo")   // Err - invalid character
/// ```
pub fn validate_minecraft_username(username: &str) -> Result<(), ValidationError> {
    if !(3..=16).contains(&username.len()) {
        let mut err = ValidationError::new("username_length");
        err.message = Some(
            format!(
                "Username must be 3 to 16 characters (got {})",
                username.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        let mut err = ValidationError::new("username_format");
        err.message =
            Some("Username must contain only letters, digits, and underscores".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_minecraft_username_valid() {
        assert!(validate_minecraft_username("Axolotl1212").is_ok());
        assert!(validate_minecraft_username("abc").is_ok());
        assert!(validate_minecraft_username("the_best_pvper_1").is_ok());
    }

    #[test]
    fn test_validate_minecraft_username_invalid_length() {
        assert!(validate_minecraft_username("ab").is_err()); // too short
        assert!(validate_minecraft_username("seventeen_chars_x").is_err()); // too long
        assert!(validate_minecraft_username("").is_err()); // empty
    }

    #[test]
    fn test_validate_minecraft_username_invalid_format() {
        assert!(validate_minecraft_username("sv.matteo").is_err()); // dot
        assert!(validate_minecraft_username("has space").is_err()); // space
        assert!(validate_minecraft_username("émile_fr").is_err()); // non-ascii
    }
}
