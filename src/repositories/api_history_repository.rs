use crate::client::AsyncSmsApiClient;
use crate::error::SmsApiResult;
use crate::models::{SmsHistoryRecord, SmsStatistics, SmsStatus};
use crate::repositories::traits::HistoryRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// History repository implementation using the Animia backend client.
///
/// This repository delegates all operations to the AsyncSmsApiClient.
pub struct ApiHistoryRepository {
    client: Arc<dyn AsyncSmsApiClient>,
}

impl ApiHistoryRepository {
    /// Create a new ApiHistoryRepository with the given client.
    pub fn new(client: Arc<dyn AsyncSmsApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HistoryRepository for ApiHistoryRepository {
    async fn store(&self, record: &SmsHistoryRecord) -> SmsApiResult<()> {
        self.client.store_beneficiary_sms(record).await
    }

    async fn history_for(&self, beneficiary_id: i64) -> SmsApiResult<Vec<SmsHistoryRecord>> {
        self.client.get_beneficiary_sms_history(beneficiary_id).await
    }

    async fn statistics(&self) -> SmsApiResult<SmsStatistics> {
        self.client.get_sms_statistics().await
    }

    async fn update_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()> {
        self.client
            .update_sms_status(sms_id, status, error_message)
            .await
    }
}
