//! Post-dispatch notifications.

use crate::models::{DispatchOutcome, SmsHistoryRecord, SmsStatus};
use crate::repositories::HistoryRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Emitted once per destination after its dispatch finished.
#[derive(Debug, Clone)]
pub struct DispatchEvent {
    /// Beneficiary the destination belongs to, if any
    pub beneficiary_id: Option<i64>,
    pub beneficiary_name: Option<String>,

    /// Exact text handed to the channel
    pub message: String,

    /// Purpose tag stored with the history row
    pub sms_type: String,

    pub outcome: DispatchOutcome,

    pub completed_at: DateTime<Utc>,
}

/// Subscriber to dispatch completions.
///
/// Called inline from the send loop, so implementations must return
/// promptly and hand any I/O to a background task.
pub trait DispatchObserver: Send + Sync {
    fn on_dispatch_complete(&self, event: &DispatchEvent);
}

/// Writes an SMS history row for every beneficiary dispatch.
///
/// Writes run on spawned tasks; a failed write is logged and dropped.
pub struct HistoryRecorder {
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryRecorder {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    /// History row for `event`, or `None` when it has no beneficiary.
    pub fn to_record(&self, event: &DispatchEvent) -> Option<SmsHistoryRecord> {
        let beneficiary_id = event.beneficiary_id?;
        let outcome = &event.outcome;

        Some(SmsHistoryRecord {
            id: None,
            beneficiary_id,
            beneficiary_name: event.beneficiary_name.clone(),
            phone_number: outcome.contact.number().to_string(),
            message: event.message.clone(),
            sms_type: event.sms_type.clone(),
            contact_type: Some(outcome.contact.kind().as_str().to_string()),
            channel: Some(outcome.channel_used.as_str().to_string()),
            status: if outcome.success {
                SmsStatus::Sent
            } else {
                SmsStatus::Failed
            },
            error_message: outcome.error_detail.clone(),
            sent_at: event.completed_at.to_rfc3339(),
        })
    }

    /// Spawn the history write for `event`.
    pub fn record(&self, event: &DispatchEvent) -> Option<JoinHandle<()>> {
        let Some(record) = self.to_record(event) else {
            tracing::debug!(
                number = %event.outcome.contact.number(),
                "No beneficiary attached, SMS history not recorded"
            );
            return None;
        };

        let repository = self.repository.clone();
        Some(tokio::spawn(async move {
            match repository.store(&record).await {
                Ok(()) => {
                    tracing::debug!(
                        beneficiary_id = record.beneficiary_id,
                        status = record.status.as_str(),
                        "SMS history recorded"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        beneficiary_id = record.beneficiary_id,
                        "Failed to record SMS history: {}",
                        e
                    );
                }
            }
        }))
    }
}

impl DispatchObserver for HistoryRecorder {
    fn on_dispatch_complete(&self, event: &DispatchEvent) {
        let _ = self.record(event);
    }
}
