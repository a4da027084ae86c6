//! SMS history records stored by the backend.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `sms_type` of one-off sends.
pub const GENERAL_SMS_TYPE: &str = "general";

/// `sms_type` of sends to many beneficiaries.
pub const BULK_SMS_TYPE: &str = "bulk";

/// Delivery status recorded in SMS history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SmsStatus {
    Sent,
    Failed,
    Delivered,
    Pending,
}

impl SmsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Delivered => "delivered",
            Self::Pending => "pending",
        }
    }
}

/// Body of `POST /api/sms/beneficiary`, and one row of a beneficiary's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmsHistoryRecord {
    /// Row id; assigned by the backend, absent on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub beneficiary_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary_name: Option<String>,

    pub phone_number: String,

    pub message: String,

    /// Purpose of the message (registration, follow_up, ...)
    #[serde(default = "default_sms_type")]
    pub sms_type: String,

    /// Which beneficiary phone field was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,

    /// Channel that carried the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    pub status: SmsStatus,

    #[serde(default)]
    pub error_message: Option<String>,

    /// ISO 8601 timestamp
    pub sent_at: String,
}

fn default_sms_type() -> String {
    GENERAL_SMS_TYPE.to_string()
}

/// Aggregate counters served by `GET /api/sms/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SmsStatistics {
    pub total_sms_sent: u64,
    pub successful_sms: u64,
    pub failed_sms: u64,
    pub beneficiaries_contacted: u64,
    pub last_sms_date: Option<String>,
}
