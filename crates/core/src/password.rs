//! Random password generator

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Allowed password lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordLimits {
    pub min_length: usize,
    pub max_length: usize,
    pub default_length: usize,
}

impl Default for PasswordLimits {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 64,
            default_length: 12,
        }
    }
}

impl PasswordLimits {
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(Error::invalid_input(
                "min_length",
                format!("must be at least 1 and at most max_length ({})", self.max_length),
            ));
        }
        if !(self.min_length..=self.max_length).contains(&self.default_length) {
            return Err(Error::invalid_input(
                "default_length",
                format!(
                    "must be between {} and {}",
                    self.min_length, self.max_length
                ),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, length: usize) -> bool {
        (self.min_length..=self.max_length).contains(&length)
    }
}

/// Which character classes to draw from, and how many characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::with_length(PasswordLimits::default().default_length)
    }
}

impl PasswordPolicy {
    /// All character classes enabled
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }

    /// Characters a password may contain, in class order
    pub fn character_pool(&self) -> Vec<char> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, set)| set.chars())
        .collect()
    }
}

/// Generate a password with the given random source
///
/// Each character is drawn uniformly and independently from the pool.
pub fn generate_password_with<R: Rng + ?Sized>(
    policy: &PasswordPolicy,
    limits: &PasswordLimits,
    rng: &mut R,
) -> Result<String> {
    if !limits.contains(policy.length) {
        return Err(Error::invalid_input(
            "length",
            format!(
                "must be between {} and {}, got {}",
                limits.min_length, limits.max_length, policy.length
            ),
        ));
    }

    let pool = policy.character_pool();
    if pool.is_empty() {
        return Err(Error::NoCharacterClasses);
    }

    Ok((0..policy.length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect())
}

/// Generate a password from the thread-local CSPRNG
pub fn generate_password(policy: &PasswordPolicy, limits: &PasswordLimits) -> Result<String> {
    generate_password_with(policy, limits, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_policy() {
        let password = generate_password(&PasswordPolicy::default(), &PasswordLimits::default())
            .unwrap();
        assert_eq!(password.chars().count(), 12);
    }

    #[test]
    fn test_pool_order_and_size() {
        let pool = PasswordPolicy::with_length(8).character_pool();
        assert_eq!(pool.len(), 26 + 26 + 10 + SYMBOLS.len());
        assert_eq!(pool[0], 'A');
        assert_eq!(pool[26], 'a');
    }

    #[test]
    fn test_only_digits() {
        let policy = PasswordPolicy {
            length: 20,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };
        let password = generate_password(&policy, &PasswordLimits::default()).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_no_classes_selected() {
        let policy = PasswordPolicy {
            length: 12,
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
        };
        assert_eq!(
            generate_password(&policy, &PasswordLimits::default()),
            Err(Error::NoCharacterClasses)
        );
    }

    #[test]
    fn test_length_bounds() {
        let limits = PasswordLimits::default();
        assert!(generate_password(&PasswordPolicy::with_length(7), &limits).is_err());
        assert!(generate_password(&PasswordPolicy::with_length(65), &limits).is_err());
        assert_eq!(
            generate_password(&PasswordPolicy::with_length(64), &limits)
                .unwrap()
                .len(),
            64
        );
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let policy = PasswordPolicy::default();
        let limits = PasswordLimits::default();
        let a = generate_password_with(&policy, &limits, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_password_with(&policy, &limits, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_limits_validate() {
        assert!(PasswordLimits::default().validate().is_ok());
        let bad = PasswordLimits {
            min_length: 10,
            max_length: 8,
            default_length: 9,
        };
        assert!(bad.validate().is_err());
        let bad_default = PasswordLimits {
            default_length: 100,
            ..PasswordLimits::default()
        };
        assert!(bad_default.validate().is_err());
    }
}
