use crate::channels::DeliveryChannel;
use crate::domain::NormalizedPhone;
use crate::metrics::Metrics;
use crate::models::ChannelKind;
use std::sync::Arc;

/// What happened when one message was pushed through the channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAttempt {
    pub channel_used: ChannelKind,
    pub success: bool,
    pub error_detail: Option<String>,
}

/// Picks a delivery channel for one message.
///
/// The native channel is tried first when it is configured and preferred.
/// The messaging-app channel is the universal fallback and its result is
/// final.
pub struct SmartDispatcher {
    native: Option<Arc<dyn DeliveryChannel>>,
    app_intent: Arc<dyn DeliveryChannel>,
    metrics: Metrics,
}

impl SmartDispatcher {
    pub fn new(app_intent: Arc<dyn DeliveryChannel>) -> Self {
        Self {
            native: None,
            app_intent,
            metrics: Metrics::new(),
        }
    }

    pub fn with_native(mut self, native: Arc<dyn DeliveryChannel>) -> Self {
        self.native = Some(native);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Send `message` to `number`; `true` if any channel succeeded.
    pub async fn dispatch(&self, number: &NormalizedPhone, message: &str, prefer_native: bool) -> bool {
        self.dispatch_detailed(number, message, prefer_native)
            .await
            .success
    }

    pub async fn dispatch_detailed(
        &self,
        number: &NormalizedPhone,
        message: &str,
        prefer_native: bool,
    ) -> ChannelAttempt {
        self.metrics.record_dispatch_attempt();

        let mut native_error = None;
        if let Some(native) = self.native.as_ref().filter(|_| prefer_native) {
            match native.send(number, message).await {
                Ok(()) => {
                    self.metrics.record_dispatch_success(ChannelKind::Native);
                    return ChannelAttempt {
                        channel_used: ChannelKind::Native,
                        success: true,
                        error_detail: None,
                    };
                }
                Err(e) => {
                    tracing::warn!(number = %number, "Native SMS failed, falling back to SMS app: {}", e);
                    self.metrics.record_fallback();
                    native_error = Some(e);
                }
            }
        }

        match self.app_intent.send(number, message).await {
            Ok(()) => {
                self.metrics.record_dispatch_success(ChannelKind::AppIntent);
                ChannelAttempt {
                    channel_used: ChannelKind::AppIntent,
                    success: true,
                    error_detail: None,
                }
            }
            Err(e) => {
                self.metrics.record_dispatch_failure();
                let detail = match native_error {
                    Some(native) => format!("native: {}; app: {}", native, e),
                    None => e.to_string(),
                };
                tracing::error!(number = %number, "All SMS channels failed: {}", detail);
                ChannelAttempt {
                    channel_used: ChannelKind::AppIntent,
                    success: false,
                    error_detail: Some(detail),
                }
            }
        }
    }
}
