use animia_sms_dispatch::channels::DeliveryChannel;
use animia_sms_dispatch::domain::NormalizedPhone;
use animia_sms_dispatch::error::{ChannelError, ChannelResult};
use animia_sms_dispatch::models::ChannelKind;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Delivery channel that always answers the same way and records sends.
#[derive(Clone)]
pub struct MockChannel {
    kind: ChannelKind,
    result: ChannelResult<()>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChannel {
    pub fn succeeding(kind: ChannelKind) -> Self {
        Self {
            kind,
            result: Ok(()),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(kind: ChannelKind, error: ChannelError) -> Self {
        Self {
            kind,
            result: Err(error),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// `(number, message)` pairs in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryChannel for MockChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    async fn send(&self, number: &NormalizedPhone, message: &str) -> ChannelResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((number.to_string(), message.to_string()));
        self.result.clone()
    }
}
