//! Beneficiary records as served by the Animia backend.

use serde::{Deserialize, Serialize};

/// Name used when a record has no display name.
pub const FALLBACK_NAME: &str = "Beneficiary";

/// A programme beneficiary.
///
/// Owned by the backend and read-only here. Only the identity, the display
/// name and the three phone fields are modelled; every other column the
/// backend returns (screenings, interventions, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Beneficiary {
    /// Backend primary key
    pub id: i64,

    /// Human-facing unique id printed on cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary phone number, as typed at registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Alternate (family) phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_phone: Option<String>,

    /// Phone number of the treating doctor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_phone: Option<String>,
}

impl Beneficiary {
    /// Create a beneficiary with no phone numbers.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Display name, falling back to "Beneficiary" when blank.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_NAME)
    }
}
