//! Direct SMS sending through the platform primitive.

use crate::channels::traits::{DeliveryChannel, PermissionProvider, SmsPrimitive};
use crate::domain::NormalizedPhone;
use crate::error::{ChannelError, ChannelResult};
use crate::models::ChannelKind;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Permission-gated direct SMS channel.
///
/// Sends without user interaction once the SMS permission is granted. A
/// failed attempt (primitive error or `success: false`) is retried after
/// `retry_delay`, up to `max_attempts` attempts in total.
pub struct NativeChannel {
    permissions: Arc<dyn PermissionProvider>,
    primitive: Arc<dyn SmsPrimitive>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl NativeChannel {
    /// Create a channel with the default policy: 2 attempts, 1 second apart.
    pub fn new(permissions: Arc<dyn PermissionProvider>, primitive: Arc<dyn SmsPrimitive>) -> Self {
        Self {
            permissions,
            primitive,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Override the retry policy. At least one attempt is always made.
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    async fn ensure_permission(&self) -> bool {
        if self.permissions.check().await {
            return true;
        }
        tracing::debug!("SMS permission missing, requesting");
        self.permissions.request().await
    }
}

#[async_trait]
impl DeliveryChannel for NativeChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Native
    }

    async fn send(&self, number: &NormalizedPhone, message: &str) -> ChannelResult<()> {
        if !self.ensure_permission().await {
            tracing::warn!(number = %number, "SMS permission denied, native send skipped");
            return Err(ChannelError::PermissionDenied);
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            match self.primitive.send_sms(number.as_str(), message).await {
                Ok(result) if result.success => {
                    tracing::info!(number = %number, attempt, "Native SMS sent");
                    return Ok(());
                }
                Ok(result) => {
                    last_error = result
                        .message
                        .unwrap_or_else(|| "SMS module reported failure".to_string());
                }
                Err(e) => {
                    last_error = e.to_string();
                }
            }

            tracing::debug!(number = %number, attempt, error = %last_error, "Native SMS attempt failed");
            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        tracing::warn!(
            number = %number,
            attempts = self.max_attempts,
            "Native SMS failed after all attempts: {}",
            last_error
        );
        Err(ChannelError::SendFailed {
            attempts: self.max_attempts,
            reason: last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{SmsSendResult, StaticPermissionProvider};
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Primitive that replays a script of replies, then keeps failing.
    struct ScriptedPrimitive {
        replies: Mutex<Vec<ChannelResult<SmsSendResult>>>,
        calls: AtomicU32,
    }

    impl ScriptedPrimitive {
        fn new(mut replies: Vec<ChannelResult<SmsSendResult>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SmsPrimitive for ScriptedPrimitive {
        async fn send_sms(&self, _number: &str, _message: &str) -> ChannelResult<SmsSendResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(SmsSendResult::failure("script exhausted")))
        }
    }

    /// Permission that starts revoked and is granted on request.
    struct PromptPermission {
        requested: AtomicBool,
        grant_on_request: bool,
    }

    #[async_trait]
    impl PermissionProvider for PromptPermission {
        async fn check(&self) -> bool {
            false
        }

        async fn request(&self) -> bool {
            self.requested.store(true, Ordering::SeqCst);
            self.grant_on_request
        }
    }

    fn number() -> NormalizedPhone {
        NormalizedPhone::from_normalized("+919876543210").unwrap()
    }

    fn channel(primitive: Arc<ScriptedPrimitive>, granted: bool) -> NativeChannel {
        NativeChannel::new(Arc::new(StaticPermissionProvider::new(granted)), primitive)
            .with_retry(2, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let primitive = Arc::new(ScriptedPrimitive::new(vec![Ok(SmsSendResult::ok())]));
        let result = channel(primitive.clone(), true).send(&number(), "hi").await;

        assert!(result.is_ok());
        assert_eq!(primitive.calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_failure_then_success() {
        let primitive = Arc::new(ScriptedPrimitive::new(vec![
            Err(ChannelError::Unavailable("busy".to_string())),
            Ok(SmsSendResult::ok()),
        ]));
        let result = channel(primitive.clone(), true).send(&number(), "hi").await;

        assert!(result.is_ok());
        assert_eq!(primitive.calls(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let primitive = Arc::new(ScriptedPrimitive::new(vec![
            Ok(SmsSendResult::failure("no signal")),
            Ok(SmsSendResult::failure("still no signal")),
            Ok(SmsSendResult::ok()),
        ]));
        let result = channel(primitive.clone(), true).send(&number(), "hi").await;

        assert_eq!(
            result,
            Err(ChannelError::SendFailed {
                attempts: 2,
                reason: "still no signal".to_string()
            })
        );
        assert_eq!(primitive.calls(), 2);
    }

    #[tokio::test]
    async fn test_permission_denied_skips_primitive() {
        let primitive = Arc::new(ScriptedPrimitive::new(vec![Ok(SmsSendResult::ok())]));
        let result = channel(primitive.clone(), false).send(&number(), "hi").await;

        assert_eq!(result, Err(ChannelError::PermissionDenied));
        assert_eq!(primitive.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_permission_is_requested() {
        let primitive = Arc::new(ScriptedPrimitive::new(vec![Ok(SmsSendResult::ok())]));
        let permission = Arc::new(PromptPermission {
            requested: AtomicBool::new(false),
            grant_on_request: true,
        });
        let channel = NativeChannel::new(permission.clone(), primitive.clone());

        assert!(channel.send(&number(), "hi").await.is_ok());
        assert!(permission.requested.load(Ordering::SeqCst));
        assert_eq!(primitive.calls(), 1);
    }

    #[test]
    fn test_with_retry_keeps_one_attempt() {
        let primitive = Arc::new(ScriptedPrimitive::new(Vec::new()));
        let channel = channel(primitive, true).with_retry(0, Duration::ZERO);
        assert_eq!(channel.max_attempts(), 1);
    }
}
