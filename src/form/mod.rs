//! Contact form field state.
//!
//! DESIGN
//! ======
//! `FormFields` is the raw text the visitor typed, untouched by validation.
//! Trimming only happens inside the checks in [`validation`], so what gets
//! dispatched is exactly what was entered.

pub mod validation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three user-editable inputs of the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    /// All editable fields, in on-page order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// HTML input name for this field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an input event names a field the form does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "message" => Ok(Self::Message),
            other => Err(UnknownField(other.to_owned())),
        }
    }
}

/// Current contents of the contact form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    /// Overwrite one field with a new raw value.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `true` when every field is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
