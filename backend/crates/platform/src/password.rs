//! Password Hashing and Verification
//!
//! One-way credential codec:
//! - Argon2id hashing (memory-hard) with a tunable work factor
//! - Random salt per hash, so hashing the same password twice yields
//!   two different PHC strings that both verify
//! - Zeroization of clear text passwords
//! - Verification never fails loudly: a malformed stored hash verifies as `false`

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Missing a digit, an upper-case letter or a special character
    #[error("Password should contain a digit, a special character and an upper-case letter")]
    WeakComposition,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Work factor parameters rejected by Argon2
    #[error("Invalid hash cost parameters: {0}")]
    InvalidCost(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with the sign-up policy applied
    ///
    /// - 8 to 128 characters (Unicode code points, after NFKC normalization)
    /// - No control characters
    /// - At least one digit, one upper-case letter and one non-word character
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.trim().nfkc().collect();

        if normalized.is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Check for control characters (except space, tab, newline)
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if !has_required_composition(&normalized) {
            return Err(PasswordPolicyError::WeakComposition);
        }

        Ok(Self(normalized))
    }

    /// Wrap a submitted password for verification only
    ///
    /// No policy is applied: a sign-in attempt must fail as "invalid
    /// credentials", never as a policy violation.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.trim().nfkc().collect())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Includes algorithm identifier, version, cost parameters, salt and hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashCost {
    /// Smallest parameters Argon2 accepts. Tests only.
    pub fn testing() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Password hasher with a fixed work factor and optional pepper
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    pepper: Option<Vec<u8>>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        Ok(Self { params, pepper })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn peppered(&self, password: &ClearTextPassword) -> Vec<u8> {
        let mut combined = password.as_bytes().to_vec();
        if let Some(pepper) = &self.pepper {
            combined.extend_from_slice(pepper);
        }
        combined
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = self.peppered(password);
        let salt = SaltString::generate(&mut OsRng);

        let result = self
            .argon2()
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }

    /// Verify a password against a stored PHC string
    ///
    /// Cost parameters are read from the PHC string, so hashes produced
    /// under an older work factor keep verifying. Returns `false` for a
    /// malformed hash.
    pub fn verify(&self, password: &ClearTextPassword, phc: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(phc) else {
            return false;
        };

        let mut bytes = self.peppered(password);
        let matches = self.argon2().verify_password(&bytes, &parsed_hash).is_ok();
        bytes.zeroize();
        matches
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// ASCII digit, ASCII upper-case letter, and anything outside `[A-Za-z0-9_]`
fn has_required_composition(password: &str) -> bool {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && c != '_');

    has_digit && has_upper && has_special
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HashCost::testing(), None).unwrap()
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("Ab1!".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = format!("A1!{}", "a".repeat(MAX_PASSWORD_LENGTH));
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_weak_composition() {
        for weak in ["alllowercase1!", "NODIGITS!!aa", "NoSpecial123"] {
            let result = ClearTextPassword::new(weak.to_string());
            assert_eq!(result.unwrap_err(), PasswordPolicyError::WeakComposition, "{weak}");
        }
    }

    #[test]
    fn test_valid_password() {
        assert!(ClearTextPassword::new("Secret#2024".to_string()).is_ok());
    }

    #[test]
    fn test_inner_space_counts_as_special() {
        assert!(ClearTextPassword::new("Abc defg1".to_string()).is_ok());
        // Surrounding whitespace is trimmed before the check
        assert_eq!(
            ClearTextPassword::new("Abcdefg1 ".to_string()).unwrap_err(),
            PasswordPolicyError::WeakComposition
        );
        assert_eq!(
            ClearTextPassword::new("Under_score1A".to_string()).unwrap_err(),
            PasswordPolicyError::WeakComposition
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = ClearTextPassword::new("Secret#2024".to_string()).unwrap();
        let hashed = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&password, hashed.as_phc_string()));

        let wrong = ClearTextPassword::for_verification("Secret#2025".to_string());
        assert!(!hasher.verify(&wrong, hashed.as_phc_string()));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = hasher();
        let password = ClearTextPassword::for_verification("Secret#2024".to_string());

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert!(hasher.verify(&password, first.as_phc_string()));
        assert!(hasher.verify(&password, second.as_phc_string()));
    }

    #[test]
    fn test_hash_is_never_plaintext() {
        let password = ClearTextPassword::for_verification("Secret#2024".to_string());
        let hashed = hasher().hash(&password).unwrap();
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(!hashed.as_phc_string().contains("Secret#2024"));
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = PasswordHasher::new(HashCost::testing(), Some(b"pepper".to_vec())).unwrap();
        let password = ClearTextPassword::for_verification("Secret#2024".to_string());
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&password, hashed.as_phc_string()));
        assert!(!hasher().verify(&password, hashed.as_phc_string()));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let password = ClearTextPassword::for_verification("Secret#2024".to_string());
        assert!(!hasher().verify(&password, "not_a_valid_hash"));
        assert!(!hasher().verify(&password, ""));
    }

    #[test]
    fn test_verify_uses_cost_from_phc_string() {
        let cheap = hasher();
        let password = ClearTextPassword::for_verification("Secret#2024".to_string());
        let hashed = cheap.hash(&password).unwrap();

        let other_cost = PasswordHasher::new(
            HashCost {
                iterations: 2,
                ..HashCost::testing()
            },
            None,
        )
        .unwrap();
        assert!(other_cost.verify(&password, hashed.as_phc_string()));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordHasher::new(
            HashCost {
                memory_kib: 0,
                iterations: 0,
                parallelism: 0,
            },
            None,
        );
        assert!(matches!(result, Err(PasswordHashError::InvalidCost(_))));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
