//! HTTP client for the Animia backend API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles bearer authentication, error
//! mapping and the `{success, ...}` response envelopes used by the backend.

mod async_wrapper;
pub use async_wrapper::{AsyncSmsApiClient, AsyncSmsApiClientImpl};

use crate::config::Config;
use crate::error::{SmsApiError, SmsApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Beneficiary, SmsHistoryRecord, SmsStatistics, SmsStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Standard backend response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub data: Option<T>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `GET /api/beneficiaries/{id}`.
#[derive(Debug, Deserialize)]
pub struct BeneficiaryResponse {
    #[serde(default)]
    pub success: bool,

    pub beneficiary: Option<Beneficiary>,
}

/// Body of `POST /api/devices/{id}/sms`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSmsRequest<'a> {
    pub phone_number: &'a str,
    pub message: &'a str,
    pub timestamp: String,
}

/// Reply of a relay device.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeviceSmsResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,
}

/// HTTP client for the Animia backend.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SmsApiClient {
    /// Base URL for the backend
    base_url: String,

    /// Bearer token
    api_token: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl SmsApiClient {
    /// Create a new SmsApiClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            api_token: config.api_token.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create an SmsApiClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    fn finish<T>(timer: HttpTimer, result: &Result<T, SmsApiError>) {
        if result.is_ok() {
            timer.complete();
        } else {
            timer.complete_with_error();
        }
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> Result<ureq::Response, SmsApiError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &self.bearer())
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        Self::finish(timer, &result);
        result
    }

    /// Execute a request carrying a JSON body.
    fn send_json(
        &self,
        method: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<ureq::Response, SmsApiError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("{} {}", method, url);

        let result = self
            .agent
            .request(method, &url)
            .set("Authorization", &self.bearer())
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {:?}", method, url, e);
            }
        }
        Self::finish(timer, &result);
        result
    }

    /// Map a ureq error to an SmsApiError.
    fn map_error(&self, error: ureq::Error) -> SmsApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => SmsApiError::Unauthorized,
                    404 => SmsApiError::NotFound(message),
                    429 => SmsApiError::RateLimitExceeded,
                    _ => SmsApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    SmsApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    SmsApiError::Timeout
                } else {
                    SmsApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> SmsApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| SmsApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(SmsApiError::JsonError)
    }

    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, what: &str) -> SmsApiResult<Option<T>> {
        if envelope.success {
            Ok(envelope.data)
        } else {
            Err(SmsApiError::Rejected(
                envelope
                    .error
                    .unwrap_or_else(|| format!("{} request was not successful", what)),
            ))
        }
    }

    // ========================= SMS History =========================

    /// Store one SMS history row for a beneficiary.
    pub fn store_beneficiary_sms(&self, record: &SmsHistoryRecord) -> SmsApiResult<()> {
        let body = serde_json::to_value(record).map_err(SmsApiError::JsonError)?;
        let response = self.send_json("POST", "/api/sms/beneficiary", &body)?;
        let envelope: ApiEnvelope<serde_json::Value> = Self::read_json(response)?;
        Self::unwrap_envelope(envelope, "SMS history")?;
        Ok(())
    }

    /// SMS history of a beneficiary, newest first as served by the backend.
    pub fn get_beneficiary_sms_history(
        &self,
        beneficiary_id: i64,
    ) -> SmsApiResult<Vec<SmsHistoryRecord>> {
        let path = format!("/api/sms/beneficiary/{}/history", beneficiary_id);
        let response = self.get(&path)?;
        let envelope: ApiEnvelope<Vec<SmsHistoryRecord>> = Self::read_json(response)?;
        Ok(Self::unwrap_envelope(envelope, "SMS history")?.unwrap_or_default())
    }

    /// Programme-wide SMS counters.
    pub fn get_sms_statistics(&self) -> SmsApiResult<SmsStatistics> {
        let response = self.get("/api/sms/statistics")?;
        let envelope: ApiEnvelope<SmsStatistics> = Self::read_json(response)?;
        Ok(Self::unwrap_envelope(envelope, "SMS statistics")?.unwrap_or_default())
    }

    /// Update the delivery status of a stored SMS.
    pub fn update_sms_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()> {
        let path = format!("/api/sms/{}/status", sms_id);
        let body = serde_json::json!({
            "status": status.as_str(),
            "errorMessage": error_message,
        });
        let response = self.send_json("PUT", &path, &body)?;
        let envelope: ApiEnvelope<serde_json::Value> = Self::read_json(response)?;
        Self::unwrap_envelope(envelope, "SMS status")?;
        Ok(())
    }

    // ========================= Beneficiaries =========================

    /// Get a single beneficiary by id.
    pub fn get_beneficiary(&self, beneficiary_id: i64) -> SmsApiResult<Beneficiary> {
        let path = format!("/api/beneficiaries/{}", beneficiary_id);
        let response = self.get(&path)?;
        let parsed: BeneficiaryResponse = Self::read_json(response)?;

        parsed
            .beneficiary
            .filter(|_| parsed.success)
            .ok_or_else(|| SmsApiError::NotFound(format!("Beneficiary {}", beneficiary_id)))
    }

    /// List beneficiaries, most recently registered first.
    pub fn get_beneficiaries(&self, limit: usize) -> SmsApiResult<Vec<Beneficiary>> {
        let path = format!("/api/beneficiaries?limit={}", limit);
        let response = self.get(&path)?;
        Self::read_json(response)
    }

    // ========================= Device Relay =========================

    /// Ask a registered device to send an SMS on our behalf.
    pub fn send_sms_to_device(
        &self,
        device_id: &str,
        phone_number: &str,
        message: &str,
    ) -> SmsApiResult<DeviceSmsResponse> {
        let path = format!("/api/devices/{}/sms", urlencoding::encode(device_id));
        let request = DeviceSmsRequest {
            phone_number,
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let body = serde_json::to_value(&request).map_err(SmsApiError::JsonError)?;
        let response = self.send_json("POST", &path, &body)?;
        Self::read_json(response)
    }
}
