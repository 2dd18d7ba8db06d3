//! Client-side checks run before a contact message may be dispatched.
//!
//! DESIGN
//! ======
//! Every check runs independently so the visitor sees all problems at once.
//! The email check is structural only (`x@y.z` with no whitespace and a
//! single `@` per segment); it is not RFC 5322 validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{FormField, FormFields};
use crate::captcha::CaptchaToken;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// =============================================================================
// ERROR KEYS
// =============================================================================

/// Anything that can carry an inline validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
    Captcha,
}

impl From<FormField> for Field {
    fn from(field: FormField) -> Self {
        match field {
            FormField::Name => Self::Name,
            FormField::Email => Self::Email,
            FormField::Message => Self::Message,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Captcha => "captcha",
        })
    }
}

/// Why a field failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Empty after trimming whitespace.
    Required,
    /// Present but not shaped like an email address.
    InvalidFormat,
    /// The CAPTCHA challenge has no live token.
    Unverified,
}

impl FieldError {
    /// Inline message shown under `field`.
    #[must_use]
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, Self::Required) => "Name is required",
            (Field::Email, Self::Required) => "Email is required",
            (Field::Message, Self::Required) => "Message is required",
            (Field::Email, Self::InvalidFormat) => "Please enter a valid email address",
            (Field::Captcha, _) | (_, Self::Unverified) => "Please verify you are not a robot",
            (_, Self::InvalidFormat) => "Invalid value",
        }
    }
}

// =============================================================================
// ERROR SET
// =============================================================================

/// Per-field validation results. An absent key means the field is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no field has an error, i.e. the form may be submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.entries.get(&field).copied()
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    /// Inline message for `field`, if it currently has an error.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|e| e.message(field))
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.entries.insert(field, error);
    }

    /// Drop the error for one field. Returns `true` if one was present.
    pub fn clear(&mut self, field: Field) -> bool {
        self.entries.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.entries.iter().map(|(f, e)| (*f, *e))
    }

    /// Field names with errors, for log fields.
    #[must_use]
    pub fn field_list(&self) -> String {
        self.entries
            .keys()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

// =============================================================================
// CHECKS
// =============================================================================

/// Structural email check; the raw value is tested, not a trimmed copy.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Run every check against the current inputs and CAPTCHA state.
#[must_use]
pub fn validate(fields: &FormFields, token: Option<&CaptchaToken>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if is_blank(&fields.name) {
        errors.insert(Field::Name, FieldError::Required);
    }

    if is_blank(&fields.email) {
        errors.insert(Field::Email, FieldError::Required);
    } else if !is_valid_email(&fields.email) {
        errors.insert(Field::Email, FieldError::InvalidFormat);
    }

    if is_blank(&fields.message) {
        errors.insert(Field::Message, FieldError::Required);
    }

    if token.is_none() {
        errors.insert(Field::Captcha, FieldError::Unverified);
    }

    errors
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
