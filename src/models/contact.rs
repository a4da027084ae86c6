//! Phone destinations derived from a beneficiary record.

use crate::domain::NormalizedPhone;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a phone destination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// The beneficiary's own number
    Primary,
    /// A family member's number
    Alternate,
    /// The treating doctor's number
    Doctor,
    /// An ad-hoc number not tied to a beneficiary field
    Single,
}

impl ContactKind {
    /// Label shown to health workers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "Primary Phone",
            Self::Alternate => "Alternative Phone",
            Self::Doctor => "Doctor Phone",
            Self::Single => "Phone",
        }
    }

    /// Identifier stored as `contact_type` in SMS history.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Alternate => "alternate",
            Self::Doctor => "doctor",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One phone destination.
///
/// Immutable once built; the number is already normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    kind: ContactKind,
    number: NormalizedPhone,
    owner_name: String,
}

impl Contact {
    pub fn new(kind: ContactKind, number: NormalizedPhone, owner_name: impl Into<String>) -> Self {
        Self {
            kind,
            number,
            owner_name: owner_name.into(),
        }
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn number(&self) -> &NormalizedPhone {
        &self.number
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Prefix `message` with the recipient's name and role.
    pub fn personalize(&self, message: &str) -> String {
        format!(
            "Hello, this message is for {} ({}):\n\n{}",
            self.owner_name,
            self.kind.label(),
            message
        )
    }
}
