use animia_sms_dispatch::error::{SmsApiError, SmsApiResult};
use animia_sms_dispatch::models::{SmsHistoryRecord, SmsStatistics, SmsStatus};
use animia_sms_dispatch::repositories::HistoryRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory SMS history; stored rows get sequential ids from 1.
#[derive(Clone, Default)]
pub struct MockHistoryRepository {
    records: Arc<Mutex<Vec<SmsHistoryRecord>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail_writes: bool,
}

impl MockHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose writes all fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<SmsHistoryRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Wait until `expected` store calls arrived; writes run on spawned tasks.
    pub async fn wait_for_stores(&self, expected: usize) {
        for _ in 0..100 {
            if self.get_call_count("store") >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn store(&self, record: &SmsHistoryRecord) -> SmsApiResult<()> {
        self.track_call("store");
        if self.fail_writes {
            return Err(SmsApiError::ApiError {
                status: 500,
                message: "database unavailable".to_string(),
            });
        }
        let mut records = self.records.lock().unwrap();
        let mut record = record.clone();
        record.id.get_or_insert(records.len() as i64 + 1);
        records.push(record);
        Ok(())
    }

    async fn history_for(&self, beneficiary_id: i64) -> SmsApiResult<Vec<SmsHistoryRecord>> {
        self.track_call("history_for");
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.beneficiary_id == beneficiary_id)
            .cloned()
            .collect())
    }

    async fn statistics(&self) -> SmsApiResult<SmsStatistics> {
        self.track_call("statistics");
        let records = self.records.lock().unwrap();
        let successful = records.iter().filter(|r| r.status == SmsStatus::Sent).count() as u64;
        let mut beneficiaries: Vec<i64> = records.iter().map(|r| r.beneficiary_id).collect();
        beneficiaries.sort_unstable();
        beneficiaries.dedup();

        Ok(SmsStatistics {
            total_sms_sent: records.len() as u64,
            successful_sms: successful,
            failed_sms: records.len() as u64 - successful,
            beneficiaries_contacted: beneficiaries.len() as u64,
            last_sms_date: records.last().map(|r| r.sent_at.clone()),
        })
    }

    async fn update_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()> {
        self.track_call("update_status");
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == Some(sms_id))
            .ok_or_else(|| SmsApiError::NotFound(format!("SMS {}", sms_id)))?;
        record.status = status;
        record.error_message = error_message.map(str::to_string);
        Ok(())
    }
}
