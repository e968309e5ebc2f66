//! Validation error types
//!
//! A validation failure is an ordinary outcome of user input, shown next to
//! the field. The messages are the user-facing text.

use serde::Serialize;
use thiserror::Error;

use crate::validation::Field;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Phone number is required")]
    PhoneRequired,

    #[error("Please enter a valid phone number (at least 10 digits)")]
    InvalidPhone,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::NameRequired | ValidationError::NameTooShort => Field::Name,
            ValidationError::EmailRequired | ValidationError::InvalidEmail => Field::Email,
            ValidationError::PhoneRequired | ValidationError::InvalidPhone => Field::Phone,
        }
    }
}
