use crate::error::SmsApiResult;
use crate::models::{Beneficiary, SmsHistoryRecord, SmsStatistics, SmsStatus};
use async_trait::async_trait;

/// Repository for SMS history.
///
/// Provides abstraction over where sent messages are recorded,
/// enabling different implementations (API client, mock).
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Record one sent (or failed) message.
    async fn store(&self, record: &SmsHistoryRecord) -> SmsApiResult<()>;

    /// Messages recorded for a beneficiary.
    async fn history_for(&self, beneficiary_id: i64) -> SmsApiResult<Vec<SmsHistoryRecord>>;

    /// Programme-wide counters.
    async fn statistics(&self) -> SmsApiResult<SmsStatistics>;

    /// Update the status of a recorded message.
    async fn update_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()>;
}

/// Repository for beneficiary lookups.
#[async_trait]
pub trait BeneficiaryRepository: Send + Sync {
    /// Retrieve a single beneficiary by ID.
    async fn get(&self, id: i64) -> SmsApiResult<Beneficiary>;

    /// Most recently registered beneficiaries.
    async fn list(&self, limit: usize) -> SmsApiResult<Vec<Beneficiary>>;
}
