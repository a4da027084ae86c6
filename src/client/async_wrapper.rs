//! Async wrapper around the synchronous SmsApiClient.
//!
//! This module provides an async interface to the synchronous SmsApiClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{DeviceSmsResponse, SmsApiClient};
use crate::error::{SmsApiError, SmsApiResult};
use crate::models::{Beneficiary, SmsHistoryRecord, SmsStatistics, SmsStatus};
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for backend operations.
///
/// Implementations must not block the runtime; the default implementation
/// moves each call onto the blocking thread pool.
#[async_trait]
pub trait AsyncSmsApiClient: Send + Sync {
    async fn store_beneficiary_sms(&self, record: &SmsHistoryRecord) -> SmsApiResult<()>;
    async fn get_beneficiary_sms_history(
        &self,
        beneficiary_id: i64,
    ) -> SmsApiResult<Vec<SmsHistoryRecord>>;
    async fn get_sms_statistics(&self) -> SmsApiResult<SmsStatistics>;
    async fn update_sms_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()>;

    async fn get_beneficiary(&self, beneficiary_id: i64) -> SmsApiResult<Beneficiary>;
    async fn get_beneficiaries(&self, limit: usize) -> SmsApiResult<Vec<Beneficiary>>;

    async fn send_sms_to_device(
        &self,
        device_id: &str,
        phone_number: &str,
        message: &str,
    ) -> SmsApiResult<DeviceSmsResponse>;
}

/// Async wrapper around synchronous SmsApiClient.
#[derive(Clone)]
pub struct AsyncSmsApiClientImpl {
    client: Arc<SmsApiClient>,
}

impl AsyncSmsApiClientImpl {
    pub fn new(client: SmsApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    async fn run_blocking<T, F>(&self, op: F) -> SmsApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&SmsApiClient) -> SmsApiResult<T> + Send + 'static,
    {
        let client = self.client.clone();
        tokio::task::spawn_blocking(move || op(client.as_ref()))
            .await
            .map_err(|e| SmsApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncSmsApiClient for AsyncSmsApiClientImpl {
    async fn store_beneficiary_sms(&self, record: &SmsHistoryRecord) -> SmsApiResult<()> {
        let record = record.clone();
        self.run_blocking(move |client| client.store_beneficiary_sms(&record))
            .await
    }

    async fn get_beneficiary_sms_history(
        &self,
        beneficiary_id: i64,
    ) -> SmsApiResult<Vec<SmsHistoryRecord>> {
        self.run_blocking(move |client| client.get_beneficiary_sms_history(beneficiary_id))
            .await
    }

    async fn get_sms_statistics(&self) -> SmsApiResult<SmsStatistics> {
        self.run_blocking(|client| client.get_sms_statistics()).await
    }

    async fn update_sms_status(
        &self,
        sms_id: i64,
        status: SmsStatus,
        error_message: Option<&str>,
    ) -> SmsApiResult<()> {
        let error_message = error_message.map(str::to_string);
        self.run_blocking(move |client| {
            client.update_sms_status(sms_id, status, error_message.as_deref())
        })
        .await
    }

    async fn get_beneficiary(&self, beneficiary_id: i64) -> SmsApiResult<Beneficiary> {
        self.run_blocking(move |client| client.get_beneficiary(beneficiary_id))
            .await
    }

    async fn get_beneficiaries(&self, limit: usize) -> SmsApiResult<Vec<Beneficiary>> {
        self.run_blocking(move |client| client.get_beneficiaries(limit))
            .await
    }

    async fn send_sms_to_device(
        &self,
        device_id: &str,
        phone_number: &str,
        message: &str,
    ) -> SmsApiResult<DeviceSmsResponse> {
        let device_id = device_id.to_string();
        let phone_number = phone_number.to_string();
        let message = message.to_string();

        self.run_blocking(move |client| {
            client.send_sms_to_device(&device_id, &phone_number, &message)
        })
        .await
    }
}
