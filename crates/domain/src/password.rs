//! Password rule sets and validation outcomes.

use serde::{Deserialize, Serialize};

use crate::lenient::or_default;

/// Characters accepted by the special character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Error reported when the password itself is missing or empty.
pub const PASSWORD_EMPTY_ERROR: &str = "Password must be a non-empty string";

/// Password rules. Every rule is optional; an empty set accepts any
/// non-empty password. A null or mistyped rule is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordRequirements {
    /// Minimum number of characters. `None` or `0` disables the rule.
    #[serde(deserialize_with = "or_default")]
    pub min_length: Option<usize>,
    /// Requires at least one ASCII uppercase letter.
    #[serde(deserialize_with = "or_default")]
    pub require_uppercase: bool,
    /// Requires at least one ASCII digit.
    #[serde(deserialize_with = "or_default")]
    pub require_numbers: bool,
    /// Requires at least one character from [`SPECIAL_CHARACTERS`].
    #[serde(deserialize_with = "or_default")]
    pub require_special_chars: bool,
}

impl PasswordRequirements {
    /// Sets the minimum length rule.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Enables the uppercase rule.
    #[must_use]
    pub fn with_uppercase(mut self) -> Self {
        self.require_uppercase = true;
        self
    }

    /// Enables the digit rule.
    #[must_use]
    pub fn with_numbers(mut self) -> Self {
        self.require_numbers = true;
        self
    }

    /// Enables the special character rule.
    #[must_use]
    pub fn with_special_chars(mut self) -> Self {
        self.require_special_chars = true;
        self
    }
}

/// Outcome of validating a password against [`PasswordRequirements`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordValidation {
    /// True when no rule failed.
    pub is_valid: bool,
    /// Failed rule messages in evaluation order.
    pub errors: Vec<String>,
    /// Checksum of the password, present only for valid passwords.
    pub hash: Option<String>,
}

impl PasswordValidation {
    /// Builds a rejected outcome carrying the given errors.
    #[must_use]
    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            hash: None,
        }
    }

    /// Builds an accepted outcome with the password checksum.
    #[must_use]
    pub fn accepted(hash: String) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            hash: Some(hash),
        }
    }
}

/// Position-weighted checksum of a password.
///
/// Sums each character's code point multiplied by its one-based position.
/// This is a deterministic digest for display and comparison in tests only.
/// It is trivially reversible by brute force and must never stand in for a
/// password hash.
#[must_use]
pub fn password_checksum(password: &str) -> u64 {
    password
        .chars()
        .zip(1_u64..)
        .fold(0_u64, |sum, (character, position)| {
            sum.saturating_add(u64::from(u32::from(character)).saturating_mul(position))
        })
}
