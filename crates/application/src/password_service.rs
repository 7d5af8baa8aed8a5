//! Password rule evaluation.

use toolbelt_domain::{
    PASSWORD_EMPTY_ERROR, PasswordRequirements, PasswordValidation, SPECIAL_CHARACTERS,
    password_checksum,
};
use tracing::debug;

/// Validates `password` against `requirements` and checksums valid passwords.
///
/// An empty password short-circuits with a single error. Otherwise every
/// enabled rule is checked and failures are reported in rule order:
/// minimum length, uppercase, digit, special character.
#[must_use]
pub fn validate_and_hash_password(
    password: &str,
    requirements: &PasswordRequirements,
) -> PasswordValidation {
    if password.is_empty() {
        return PasswordValidation::rejected(vec![PASSWORD_EMPTY_ERROR.to_owned()]);
    }

    let mut errors = Vec::new();

    if let Some(min_length) = requirements.min_length.filter(|length| *length > 0)
        && password.chars().count() < min_length
    {
        errors.push(format!(
            "Password must be at least {min_length} characters long"
        ));
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_owned());
    }

    if requirements.require_numbers && !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_owned());
    }

    if requirements.require_special_chars && !password.chars().any(is_special_character) {
        errors.push("Password must contain at least one special character".to_owned());
    }

    if !errors.is_empty() {
        debug!(failed_rules = errors.len(), "password rejected");
        return PasswordValidation::rejected(errors);
    }

    PasswordValidation::accepted(password_checksum(password).to_string())
}

fn is_special_character(character: char) -> bool {
    SPECIAL_CHARACTERS.contains(character)
}
