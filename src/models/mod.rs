//! Data models for beneficiaries, contacts, dispatch outcomes and SMS history.

pub mod beneficiary;
pub mod contact;
pub mod history;
pub mod outcome;

pub use beneficiary::Beneficiary;
pub use contact::{Contact, ContactKind};
pub use history::{SmsHistoryRecord, SmsStatistics, SmsStatus, BULK_SMS_TYPE, GENERAL_SMS_TYPE};
pub use outcome::{
    BeneficiaryReport, BulkReport, BulkSummary, ChannelKind, ContactBatchReport,
    DispatchOutcome, DispatchSummary,
};
