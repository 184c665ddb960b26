//! Random password generator

use super::strength::{meets_strength_rule, MIN_PASSWORD_LENGTH};
use super::validation::MAX_PASSWORD_LENGTH;
use super::PasswordError;
use rand::Rng;

/// Character sets for password generation
pub struct CharacterSets;

impl CharacterSets {
    pub const LOWERCASE: &'static [u8] = b"abcdefghijklmnopqrstuvwxyz";
    pub const UPPERCASE: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    pub const DIGITS: &'static [u8] = b"0123456789";
    /// All 32 ASCII punctuation characters
    pub const PUNCTUATION: &'static [u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

    const AMBIGUOUS: &'static [u8] = b"lI1O0";
}

/// Give up after this many rejected candidates.
pub const MAX_ATTEMPTS: usize = 10_000;

/// Configuration for password generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordGeneratorConfig {
    /// Length of the password to generate
    pub length: usize,
    /// Include ASCII punctuation
    pub include_symbols: bool,
    /// Exclude ambiguous characters (l, I, 1, O, 0)
    pub exclude_ambiguous: bool,
}

impl Default for PasswordGeneratorConfig {
    fn default() -> Self {
        Self {
            length: 16,
            include_symbols: true,
            exclude_ambiguous: false,
        }
    }
}

impl PasswordGeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password length
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Include symbols
    pub fn with_symbols(mut self, include: bool) -> Self {
        self.include_symbols = include;
        self
    }

    /// Exclude ambiguous characters
    pub fn exclude_ambiguous(mut self, exclude: bool) -> Self {
        self.exclude_ambiguous = exclude;
        self
    }

    /// Validate the configuration
    ///
    /// The length must fit the stored password column so a generated
    /// password can always be saved.
    pub fn validate(&self) -> Result<(), PasswordError> {
        if self.length < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::LengthTooShort {
                min: MIN_PASSWORD_LENGTH,
                got: self.length,
            });
        }
        if self.length > MAX_PASSWORD_LENGTH {
            return Err(PasswordError::LengthTooLong {
                max: MAX_PASSWORD_LENGTH,
                got: self.length,
            });
        }
        Ok(())
    }

    fn pool(&self) -> Vec<u8> {
        let mut pool = Vec::new();
        pool.extend_from_slice(CharacterSets::UPPERCASE);
        pool.extend_from_slice(CharacterSets::LOWERCASE);
        pool.extend_from_slice(CharacterSets::DIGITS);

        if self.include_symbols {
            pool.extend_from_slice(CharacterSets::PUNCTUATION);
        }

        if self.exclude_ambiguous {
            pool.retain(|c| !CharacterSets::AMBIGUOUS.contains(c));
        }

        pool
    }
}

/// Generate a random password that satisfies the strength rule
pub fn generate_password(config: &PasswordGeneratorConfig) -> Result<String, PasswordError> {
    generate_password_with_rng(config, &mut rand::thread_rng())
}

/// Generate a password drawing from the given random source
///
/// Every character is drawn uniformly from the pool; candidates that fail
/// the strength rule are discarded and the whole string is drawn again.
pub fn generate_password_with_rng<R: Rng + ?Sized>(
    config: &PasswordGeneratorConfig,
    rng: &mut R,
) -> Result<String, PasswordError> {
    config.validate()?;

    let pool = config.pool();

    for _ in 0..MAX_ATTEMPTS {
        let candidate: String = (0..config.length)
            .map(|_| pool[rng.gen_range(0..pool.len())] as char)
            .collect();

        if meets_strength_rule(&candidate) {
            return Ok(candidate);
        }
    }

    Err(PasswordError::Exhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_default_password() {
        let password = generate_password(&PasswordGeneratorConfig::default()).unwrap();
        assert_eq!(password.len(), 16);
        assert!(meets_strength_rule(&password));
    }

    #[test]
    fn test_generated_passwords_always_pass_the_rule() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [8, 9, 12, 16, 32, 50] {
            let config = PasswordGeneratorConfig::default().length(length);
            for _ in 0..50 {
                let password = generate_password_with_rng(&config, &mut rng).unwrap();
                assert_eq!(password.chars().count(), length);
                assert!(password.chars().any(|c| c.is_ascii_alphabetic()));
                assert!(password.chars().any(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_characters_come_from_the_pool() {
        let password = generate_password(&PasswordGeneratorConfig::default().length(50)).unwrap();
        assert!(password
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || CharacterSets::PUNCTUATION.contains(&b)));
    }

    #[test]
    fn test_generate_without_symbols() {
        let config = PasswordGeneratorConfig::default()
            .with_symbols(false)
            .length(20);
        let password = generate_password(&config).unwrap();
        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_no_ambiguous() {
        let config = PasswordGeneratorConfig::default()
            .exclude_ambiguous(true)
            .length(40);
        let password = generate_password(&config).unwrap();
        assert!(!password
            .chars()
            .any(|c| matches!(c, 'l' | '1' | 'I' | 'O' | '0')));
    }

    #[test]
    fn test_validate_length_too_short() {
        let config = PasswordGeneratorConfig::default().length(7);
        assert_eq!(
            generate_password(&config),
            Err(PasswordError::LengthTooShort { min: 8, got: 7 })
        );
    }

    #[test]
    fn test_validate_length_too_long() {
        let too_long = MAX_PASSWORD_LENGTH + 1;
        let config = PasswordGeneratorConfig::default().length(too_long);
        assert_eq!(
            generate_password(&config),
            Err(PasswordError::LengthTooLong { max: 50, got: 51 })
        );
        assert!(PasswordGeneratorConfig::default()
            .length(MAX_PASSWORD_LENGTH)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_passwords_are_unique() {
        let config = PasswordGeneratorConfig::default();
        let p1 = generate_password(&config).unwrap();
        let p2 = generate_password(&config).unwrap();
        assert_ne!(p1, p2);
    }
}
