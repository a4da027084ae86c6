//! Contact extraction.
//!
//! A beneficiary carries up to three phone fields. Each valid one becomes a
//! [`Contact`] in fixed order: primary, alternate, doctor.

use crate::domain::{NormalizedPhone, PhoneNormalizer};
use crate::models::{Beneficiary, Contact, ContactKind};
use std::collections::HashSet;

/// Builds contacts from beneficiary records.
#[derive(Debug, Clone, Default)]
pub struct ContactExtractor {
    normalizer: PhoneNormalizer,
}

impl ContactExtractor {
    pub fn new(normalizer: PhoneNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &PhoneNormalizer {
        &self.normalizer
    }

    /// Valid phone fields of `beneficiary` as contacts.
    ///
    /// Blank or invalid fields are skipped. An empty result means "no
    /// contacts found" and is not an error.
    pub fn extract_contacts(&self, beneficiary: &Beneficiary) -> Vec<Contact> {
        let owner = beneficiary.display_name();

        Self::phone_fields(beneficiary)
            .into_iter()
            .filter_map(|(kind, raw)| {
                let raw = raw?;
                match self.normalizer.parse(raw) {
                    Ok(number) => Some(Contact::new(kind, number, owner)),
                    Err(e) => {
                        if !raw.trim().is_empty() {
                            tracing::debug!(
                                beneficiary_id = beneficiary.id,
                                kind = kind.as_str(),
                                "Skipping phone field: {}",
                                e
                            );
                        }
                        None
                    }
                }
            })
            .collect()
    }

    /// Every valid number across `beneficiaries`, de-duplicated after
    /// normalization, in first-seen order.
    pub fn extract_unique_numbers(&self, beneficiaries: &[Beneficiary]) -> Vec<NormalizedPhone> {
        let mut seen = HashSet::new();
        beneficiaries
            .iter()
            .flat_map(|b| self.extract_contacts(b))
            .map(|contact| contact.number().clone())
            .filter(|number| seen.insert(number.clone()))
            .collect()
    }

    fn phone_fields(beneficiary: &Beneficiary) -> [(ContactKind, Option<&str>); 3] {
        [
            (ContactKind::Primary, beneficiary.phone.as_deref()),
            (ContactKind::Alternate, beneficiary.alt_phone.as_deref()),
            (ContactKind::Doctor, beneficiary.doctor_phone.as_deref()),
        ]
    }
}
