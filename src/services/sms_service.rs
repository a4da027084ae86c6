//! SMS service layer.
//!
//! Business logic behind the MCP tools: input validation, beneficiary
//! lookups, running the orchestrator and building the user-facing report.

use crate::dispatch::BulkOrchestrator;
use crate::error::{SmsApiError, SmsApiResult};
use crate::metrics::MetricsSummary;
use crate::models::{
    Beneficiary, BeneficiaryReport, BulkReport, Contact, ContactBatchReport, DispatchOutcome,
    SmsHistoryRecord, SmsStatistics, SmsStatus, BULK_SMS_TYPE, GENERAL_SMS_TYPE,
};
use crate::report::{self, ReportDialog};
use crate::repositories::{BeneficiaryRepository, HistoryRepository};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_BULK_LIMIT: usize = 100;
const MAX_BULK_LIMIT: usize = 500;

/// Result of checking a raw phone number.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhoneCheck {
    pub input: String,
    pub normalized: String,
    pub valid: bool,
}

/// Contacts derived from one beneficiary.
#[derive(Debug, Clone, Serialize)]
pub struct BeneficiaryContacts {
    pub beneficiary_id: i64,
    pub beneficiary_name: String,
    pub contacts: Vec<Contact>,
}

/// Result of a single-number send.
#[derive(Debug, Clone, Serialize)]
pub struct NumberSendResponse {
    pub outcome: DispatchOutcome,
    pub dialog: ReportDialog,
}

/// Result of a send to one beneficiary's contacts.
#[derive(Debug, Clone, Serialize)]
pub struct BeneficiarySendResponse {
    pub report: BeneficiaryReport,
    pub dialog: ReportDialog,
}

/// Which beneficiaries a bulk send targets, and how.
#[derive(Debug, Clone, Default)]
pub struct BulkSendRequest {
    pub message: String,

    /// Explicit ids; when empty the most recent `limit` beneficiaries are used
    pub beneficiary_ids: Vec<i64>,

    pub limit: Option<usize>,

    /// History tag; `bulk` when absent
    pub sms_type: Option<String>,

    /// Send the bare message once per distinct number instead of a
    /// personalized message per contact
    pub unique_numbers: bool,

    pub prefer_native: Option<bool>,
}

/// Result of a bulk send.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSendResponse {
    /// Per-beneficiary reports (personalized mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<BulkReport>,

    /// Per-number outcomes (de-duplicated mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<ContactBatchReport>,

    /// Requested ids the backend could not return
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_beneficiaries: Vec<i64>,

    pub dialog: ReportDialog,
}

/// SMS service trait for business operations.
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Normalize and validate a raw phone number.
    fn check_phone(&self, raw: &str) -> PhoneCheck;

    /// List the contacts a beneficiary send would reach.
    async fn list_contacts(&self, beneficiary_id: i64) -> SmsApiResult<BeneficiaryContacts>;

    /// Send a message unchanged to one number.
    async fn send_to_number(
        &self,
        phone: &str,
        message: &str,
        prefer_native: Option<bool>,
    ) -> SmsApiResult<NumberSendResponse>;

    /// Send a personalized message to every contact of a beneficiary.
    ///
    /// `sms_type` tags the history rows; `general` when absent.
    async fn send_to_beneficiary(
        &self,
        beneficiary_id: i64,
        message: &str,
        sms_type: Option<&str>,
        prefer_native: Option<bool>,
    ) -> SmsApiResult<BeneficiarySendResponse>;

    /// Send to many beneficiaries.
    async fn send_bulk(&self, request: BulkSendRequest) -> SmsApiResult<BulkSendResponse>;

    /// SMS history of a beneficiary.
    async fn history(&self, beneficiary_id: i64) -> SmsApiResult<Vec<SmsHistoryRecord>>;

    /// Programme-wide SMS counters.
    async fn statistics(&self) -> SmsApiResult<SmsStatistics>;

    /// Record a delivery report for a stored SMS.
    async fn update_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()>;

    /// Snapshot of this process's HTTP and dispatch counters.
    fn metrics(&self) -> MetricsSummary;
}

/// Default implementation of SmsService.
pub struct SmsServiceImpl {
    orchestrator: Arc<BulkOrchestrator>,
    beneficiaries: Arc<dyn BeneficiaryRepository>,
    history: Arc<dyn HistoryRepository>,
    prefer_native: bool,
}

/// Validation helper functions.
impl SmsServiceImpl {
    fn validate_message(message: &str) -> SmsApiResult<()> {
        if message.trim().is_empty() {
            return Err(SmsApiError::InvalidRequest(
                "Message cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_sms_type(sms_type: &str) -> SmsApiResult<()> {
        let well_formed = !sms_type.is_empty()
            && sms_type
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !well_formed {
            return Err(SmsApiError::InvalidRequest(format!(
                "SMS type must be lowercase letters, digits or '_', got: {:?}",
                sms_type
            )));
        }
        Ok(())
    }

    fn validate_sms_id(id: i64) -> SmsApiResult<()> {
        if id <= 0 {
            return Err(SmsApiError::InvalidRequest(format!(
                "SMS ID must be positive, got: {}",
                id
            )));
        }
        Ok(())
    }

    fn validate_beneficiary_id(id: i64) -> SmsApiResult<()> {
        if id <= 0 {
            return Err(SmsApiError::InvalidRequest(format!(
                "Beneficiary ID must be positive, got: {}",
                id
            )));
        }
        Ok(())
    }
}

impl SmsServiceImpl {
    /// Create a new SMS service.
    pub fn new(
        orchestrator: Arc<BulkOrchestrator>,
        beneficiaries: Arc<dyn BeneficiaryRepository>,
        history: Arc<dyn HistoryRepository>,
        prefer_native: bool,
    ) -> Self {
        Self {
            orchestrator,
            beneficiaries,
            history,
            prefer_native,
        }
    }

    /// Fetch the requested beneficiaries concurrently.
    ///
    /// Ids the backend cannot return are logged and reported back instead
    /// of failing the whole batch.
    async fn load_beneficiaries(
        &self,
        request: &BulkSendRequest,
    ) -> SmsApiResult<(Vec<Beneficiary>, Vec<i64>)> {
        if request.beneficiary_ids.is_empty() {
            let limit = request
                .limit
                .unwrap_or(DEFAULT_BULK_LIMIT)
                .clamp(1, MAX_BULK_LIMIT);
            return Ok((self.beneficiaries.list(limit).await?, Vec::new()));
        }

        let lookups = request
            .beneficiary_ids
            .iter()
            .map(|&id| async move { (id, self.beneficiaries.get(id).await) });

        let mut found = Vec::new();
        let mut missing = Vec::new();
        for (id, result) in join_all(lookups).await {
            match result {
                Ok(beneficiary) => found.push(beneficiary),
                Err(e) => {
                    tracing::warn!(beneficiary_id = id, "Skipping beneficiary: {}", e);
                    missing.push(id);
                }
            }
        }
        Ok((found, missing))
    }
}

#[async_trait]
impl SmsService for SmsServiceImpl {
    fn check_phone(&self, raw: &str) -> PhoneCheck {
        let normalizer = self.orchestrator.extractor().normalizer();
        PhoneCheck {
            input: raw.to_string(),
            normalized: normalizer.normalize(raw),
            valid: normalizer.is_valid(raw),
        }
    }

    async fn list_contacts(&self, beneficiary_id: i64) -> SmsApiResult<BeneficiaryContacts> {
        Self::validate_beneficiary_id(beneficiary_id)?;

        let beneficiary = self.beneficiaries.get(beneficiary_id).await?;
        let contacts = self.orchestrator.extractor().extract_contacts(&beneficiary);

        Ok(BeneficiaryContacts {
            beneficiary_id: beneficiary.id,
            beneficiary_name: beneficiary.display_name().to_string(),
            contacts,
        })
    }

    async fn send_to_number(
        &self,
        phone: &str,
        message: &str,
        prefer_native: Option<bool>,
    ) -> SmsApiResult<NumberSendResponse> {
        Self::validate_message(message)?;

        let outcome = self
            .orchestrator
            .send_to_number(phone, message, prefer_native.unwrap_or(self.prefer_native))
            .await
            .map_err(|e| SmsApiError::InvalidRequest(e.to_string()))?;

        let dialog = report::summarize(std::slice::from_ref(&outcome));
        Ok(NumberSendResponse { outcome, dialog })
    }

    async fn send_to_beneficiary(
        &self,
        beneficiary_id: i64,
        message: &str,
        sms_type: Option<&str>,
        prefer_native: Option<bool>,
    ) -> SmsApiResult<BeneficiarySendResponse> {
        Self::validate_beneficiary_id(beneficiary_id)?;
        Self::validate_message(message)?;
        let sms_type = sms_type.unwrap_or(GENERAL_SMS_TYPE);
        Self::validate_sms_type(sms_type)?;

        let beneficiary = self.beneficiaries.get(beneficiary_id).await?;
        let report = self
            .orchestrator
            .send_to_beneficiary_as(
                &beneficiary,
                message,
                sms_type,
                prefer_native.unwrap_or(self.prefer_native),
            )
            .await;

        let dialog = if report.has_contacts() {
            report::summarize(&report.outcomes)
        } else {
            report::no_contacts_dialog(&report.beneficiary_name)
        };
        Ok(BeneficiarySendResponse { report, dialog })
    }

    async fn send_bulk(&self, request: BulkSendRequest) -> SmsApiResult<BulkSendResponse> {
        Self::validate_message(&request.message)?;
        for &id in &request.beneficiary_ids {
            Self::validate_beneficiary_id(id)?;
        }
        let sms_type = request.sms_type.as_deref().unwrap_or(BULK_SMS_TYPE);
        Self::validate_sms_type(sms_type)?;

        let prefer_native = request.prefer_native.unwrap_or(self.prefer_native);
        let (beneficiaries, missing_beneficiaries) = self.load_beneficiaries(&request).await?;

        if request.unique_numbers {
            let numbers = self
                .orchestrator
                .extractor()
                .extract_unique_numbers(&beneficiaries);
            tracing::info!(
                beneficiaries = beneficiaries.len(),
                numbers = numbers.len(),
                "Broadcasting SMS to unique numbers"
            );

            let batch = self
                .orchestrator
                .send_to_numbers(&numbers, &request.message, prefer_native)
                .await;
            let dialog = report::summarize(&batch.outcomes);
            return Ok(BulkSendResponse {
                report: None,
                broadcast: Some(batch),
                missing_beneficiaries,
                dialog,
            });
        }

        let bulk = self
            .orchestrator
            .send_to_beneficiaries_as(&beneficiaries, &request.message, sms_type, prefer_native)
            .await;
        let dialog = report::summarize_bulk(&bulk);
        Ok(BulkSendResponse {
            report: Some(bulk),
            broadcast: None,
            missing_beneficiaries,
            dialog,
        })
    }

    async fn history(&self, beneficiary_id: i64) -> SmsApiResult<Vec<SmsHistoryRecord>> {
        Self::validate_beneficiary_id(beneficiary_id)?;
        self.history.history_for(beneficiary_id).await
    }

    async fn statistics(&self) -> SmsApiResult<SmsStatistics> {
        self.history.statistics().await
    }

    async fn update_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()> {
        Self::validate_sms_id(sms_id)?;

        self.history
            .update_status(sms_id, status, error_message)
            .await?;
        tracing::info!(sms_id, status = status.as_str(), "SMS status updated");
        Ok(())
    }

    fn metrics(&self) -> MetricsSummary {
        self.orchestrator.dispatcher().metrics().summary()
    }
}
