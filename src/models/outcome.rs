//! Per-destination dispatch outcomes and the summaries derived from them.

use super::contact::Contact;
use serde::{Deserialize, Serialize};

/// Delivery channel that produced an outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Direct platform send
    Native,
    /// Messaging app opened pre-filled; the user still has to press send
    AppIntent,
    /// No channel was attempted
    None,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::AppIntent => "app_intent",
            Self::None => "none",
        }
    }
}

/// Result of one dispatch to one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub contact: Contact,
    pub channel_used: ChannelKind,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DispatchOutcome {
    pub fn succeeded(contact: Contact, channel_used: ChannelKind) -> Self {
        Self {
            contact,
            channel_used,
            success: true,
            error_detail: None,
        }
    }

    pub fn failed(contact: Contact, channel_used: ChannelKind, error: impl Into<String>) -> Self {
        Self {
            contact,
            channel_used,
            success: false,
            error_detail: Some(error.into()),
        }
    }
}

/// Counts over a list of outcomes.
///
/// Only obtainable from outcomes, so `successful + failed == total` and
/// `sent + opened == successful` hold for every value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    total: usize,
    successful: usize,
    failed: usize,
    /// Successes handed to the network by the native channel
    sent: usize,
    /// Successes that only opened the messaging app
    opened: usize,
}

impl DispatchSummary {
    pub fn from_outcomes(outcomes: &[DispatchOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            acc.total += 1;
            match (outcome.success, outcome.channel_used) {
                (true, ChannelKind::Native) => {
                    acc.successful += 1;
                    acc.sent += 1;
                }
                (true, _) => {
                    acc.successful += 1;
                    acc.opened += 1;
                }
                (false, _) => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn opened(&self) -> usize {
        self.opened
    }
}

/// Outcomes of a contact loop.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactBatchReport {
    pub outcomes: Vec<DispatchOutcome>,
    pub summary: DispatchSummary,
}

impl ContactBatchReport {
    pub fn new(outcomes: Vec<DispatchOutcome>) -> Self {
        let summary = DispatchSummary::from_outcomes(&outcomes);
        Self { outcomes, summary }
    }
}

/// Outcomes for every contact of one beneficiary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BeneficiaryReport {
    pub beneficiary_id: i64,
    pub beneficiary_name: String,
    pub outcomes: Vec<DispatchOutcome>,
    pub summary: DispatchSummary,
}

impl BeneficiaryReport {
    pub fn new(beneficiary_id: i64, beneficiary_name: impl Into<String>, batch: ContactBatchReport) -> Self {
        Self {
            beneficiary_id,
            beneficiary_name: beneficiary_name.into(),
            outcomes: batch.outcomes,
            summary: batch.summary,
        }
    }

    /// Report for a beneficiary with no valid phone number.
    pub fn no_contacts(beneficiary_id: i64, beneficiary_name: impl Into<String>) -> Self {
        Self::new(beneficiary_id, beneficiary_name, ContactBatchReport::new(Vec::new()))
    }

    /// False when the beneficiary had no valid phone number; nothing was sent.
    pub fn has_contacts(&self) -> bool {
        !self.outcomes.is_empty()
    }
}

/// Beneficiary-level totals of a bulk send.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct BulkSummary {
    beneficiaries: usize,
    beneficiaries_without_contacts: usize,
    total: usize,
    successful: usize,
    failed: usize,
    sent: usize,
    opened: usize,
}

impl BulkSummary {
    pub fn from_reports(reports: &[BeneficiaryReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, report| {
            acc.beneficiaries += 1;
            if !report.has_contacts() {
                acc.beneficiaries_without_contacts += 1;
            }
            acc.total += report.summary.total();
            acc.successful += report.summary.successful();
            acc.failed += report.summary.failed();
            acc.sent += report.summary.sent();
            acc.opened += report.summary.opened();
            acc
        })
    }

    pub fn beneficiaries(&self) -> usize {
        self.beneficiaries
    }

    pub fn beneficiaries_without_contacts(&self) -> usize {
        self.beneficiaries_without_contacts
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn opened(&self) -> usize {
        self.opened
    }
}

/// Result of sending one message to many beneficiaries.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BulkReport {
    pub reports: Vec<BeneficiaryReport>,
    pub summary: BulkSummary,
}

impl BulkReport {
    pub fn new(reports: Vec<BeneficiaryReport>) -> Self {
        let summary = BulkSummary::from_reports(&reports);
        Self { reports, summary }
    }
}
