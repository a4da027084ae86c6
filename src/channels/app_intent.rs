//! Messaging-app intent channel.

use crate::channels::traits::{DeliveryChannel, UriOpener};
use crate::domain::NormalizedPhone;
use crate::error::{ChannelError, ChannelResult};
use crate::models::ChannelKind;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Mobile platform whose messaging-app URI format is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPlatform {
    Android,
    Ios,
}

impl TargetPlatform {
    /// URI opening the messaging app with recipient and body filled in.
    pub fn compose_uri(&self, number: &NormalizedPhone, message: &str) -> String {
        let body = urlencoding::encode(message);
        match self {
            Self::Android => format!(
                "intent://send?to={}&body={}#Intent;scheme=sms;package=com.android.mms;end",
                number, body
            ),
            Self::Ios => format!("sms:{}&body={}", number, body),
        }
    }

    /// Simplified URI with the recipient only.
    pub fn fallback_uri(&self, number: &NormalizedPhone) -> String {
        format!("sms:{}", number)
    }
}

impl FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(format!("Must be 'android' or 'ios', got: {}", other)),
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Android => f.write_str("android"),
            Self::Ios => f.write_str("ios"),
        }
    }
}

/// Opens the system messaging app pre-filled with the message.
///
/// Needs no permission. `Ok` means a compose screen was opened; whether
/// the user actually sent the message is unknown.
pub struct AppIntentChannel {
    platform: TargetPlatform,
    opener: Arc<dyn UriOpener>,
}

impl AppIntentChannel {
    pub fn new(platform: TargetPlatform, opener: Arc<dyn UriOpener>) -> Self {
        Self { platform, opener }
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }
}

#[async_trait]
impl DeliveryChannel for AppIntentChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::AppIntent
    }

    async fn send(&self, number: &NormalizedPhone, message: &str) -> ChannelResult<()> {
        let uri = self.platform.compose_uri(number, message);
        tracing::debug!(platform = %self.platform, "Opening SMS app: {}", uri);

        let primary_error = match self.opener.open(&uri).await {
            Ok(()) => {
                tracing::info!(number = %number, "SMS app opened");
                return Ok(());
            }
            Err(e) => e,
        };

        tracing::warn!(number = %number, "Failed to open SMS app, trying simple format: {}", primary_error);
        let simple = self.platform.fallback_uri(number);
        match self.opener.open(&simple).await {
            Ok(()) => {
                tracing::info!(number = %number, "SMS app opened without body");
                Ok(())
            }
            Err(e) => {
                tracing::error!(number = %number, "Cannot open SMS app: {}", e);
                Err(ChannelError::OpenFailed(format!(
                    "{}; simple format: {}",
                    primary_error, e
                )))
            }
        }
    }
}
