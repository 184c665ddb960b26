//! The password strength rule shared by validation and generation

use super::ValidationError;

/// Minimum number of characters a password must have.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check a password against the strength rule
///
/// The rule: at least [`MIN_PASSWORD_LENGTH`] characters, at least one ASCII
/// letter and at least one ASCII digit. Punctuation and any other characters
/// are allowed but not required.
pub fn check_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_letter || !has_digit {
        return Err(ValidationError::PasswordTooWeak);
    }

    Ok(())
}

/// Whether `password` satisfies the strength rule
pub fn meets_strength_rule(password: &str) -> bool {
    check_strength(password).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_letters_and_digits() {
        assert!(meets_strength_rule("Passw0rd!"));
        assert!(meets_strength_rule("abcdefg1"));
        assert!(meets_strength_rule("12345678a"));
    }

    #[test]
    fn test_rejects_short_passwords() {
        assert_eq!(check_strength("Pa55w0r"), Err(ValidationError::PasswordTooShort));
        assert_eq!(check_strength(""), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn test_rejects_missing_letter_or_digit() {
        assert_eq!(check_strength("12345678"), Err(ValidationError::PasswordTooWeak));
        assert_eq!(check_strength("Password"), Err(ValidationError::PasswordTooWeak));
        assert_eq!(check_strength("!!!!!!!!"), Err(ValidationError::PasswordTooWeak));
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        // 'é' is alphabetic but not an ASCII letter
        assert_eq!(check_strength("éééééé12"), Err(ValidationError::PasswordTooWeak));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // seven characters, more than eight bytes
        assert_eq!(check_strength("äbc1234"), Err(ValidationError::PasswordTooShort));
    }
}
