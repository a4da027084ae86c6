//! SMS primitive backed by a registered relay device.

use crate::channels::traits::{SmsPrimitive, SmsSendResult};
use crate::client::AsyncSmsApiClient;
use crate::error::{ChannelError, ChannelResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Sends through `POST /api/devices/{id}/sms`; the backend forwards the
/// message to a phone that sends it with its own SIM.
pub struct DeviceRelaySms {
    client: Arc<dyn AsyncSmsApiClient>,
    device_id: String,
}

impl DeviceRelaySms {
    pub fn new(client: Arc<dyn AsyncSmsApiClient>, device_id: impl Into<String>) -> Self {
        Self {
            client,
            device_id: device_id.into(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

#[async_trait]
impl SmsPrimitive for DeviceRelaySms {
    async fn send_sms(&self, number: &str, message: &str) -> ChannelResult<SmsSendResult> {
        let response = self
            .client
            .send_sms_to_device(&self.device_id, number, message)
            .await
            .map_err(|e| ChannelError::Unavailable(format!("relay device {}: {}", self.device_id, e)))?;

        if response.success {
            Ok(SmsSendResult::ok())
        } else {
            Ok(SmsSendResult::failure(
                response
                    .error
                    .unwrap_or_else(|| "Relay device reported failure".to_string()),
            ))
        }
    }
}
