//! Field rules for the RSVP form

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::Result;

/// Something@something.something, no whitespace.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9\s\-+()]+$").unwrap());

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    /// The `name` attribute of the form input.
    pub fn input_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    pub fn from_input_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.input_name() == name)
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    // Counted in UTF-16 code units, as the browser measures input length
    if trimmed.encode_utf16().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Digits, spaces, `-`, `+` and parentheses only, with at least ten digits.
pub fn validate_phone(phone: &str) -> Result<()> {
    if phone.trim().is_empty() {
        return Err(ValidationError::PhoneRequired);
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !PHONE_RE.is_match(phone) || digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

pub fn validate(field: Field, value: &str) -> Result<()> {
    match field {
        Field::Name => validate_name(value),
        Field::Email => validate_email(value),
        Field::Phone => validate_phone(value),
    }
}
