use crate::domain::NormalizedPhone;
use crate::error::ChannelResult;
use crate::models::ChannelKind;
use async_trait::async_trait;

/// A way of getting a message to a phone number.
///
/// Implementations never panic; every failure is an `Err` that the
/// dispatcher records and moves past.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Which kind of channel this is, for outcome reporting.
    fn kind(&self) -> ChannelKind;

    /// Attempt delivery of `message` to `number`.
    async fn send(&self, number: &NormalizedPhone, message: &str) -> ChannelResult<()>;
}

/// Runtime permission state for direct SMS sending.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Whether the SMS permission is currently granted.
    async fn check(&self) -> bool;

    /// Ask for the permission. May suspend on a user-facing prompt.
    async fn request(&self) -> bool;
}

/// Reply of the platform send primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsSendResult {
    pub success: bool,
    pub message: Option<String>,
}

impl SmsSendResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// The platform's direct SMS send primitive.
#[async_trait]
pub trait SmsPrimitive: Send + Sync {
    async fn send_sms(&self, number: &str, message: &str) -> ChannelResult<SmsSendResult>;
}

/// Generic "open this URI" capability of the host.
#[async_trait]
pub trait UriOpener: Send + Sync {
    async fn open(&self, uri: &str) -> ChannelResult<()>;
}
