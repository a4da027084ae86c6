use animia_sms_dispatch::channels::{PermissionProvider, SmsPrimitive, SmsSendResult, UriOpener};
use animia_sms_dispatch::error::{ChannelError, ChannelResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Permission provider with a fixed answer and call tracking.
#[derive(Clone)]
pub struct MockPermission {
    granted: bool,
    requests: Arc<AtomicUsize>,
}

impl MockPermission {
    pub fn granted() -> Self {
        Self {
            granted: true,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn denied() -> Self {
        Self {
            granted: false,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionProvider for MockPermission {
    async fn check(&self) -> bool {
        self.granted
    }

    async fn request(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.granted
    }
}

/// SMS primitive that always fails, or always succeeds.
#[derive(Clone)]
pub struct MockSmsPrimitive {
    success: bool,
    calls: Arc<AtomicUsize>,
}

impl MockSmsPrimitive {
    pub fn succeeding() -> Self {
        Self {
            success: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            success: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SmsPrimitive for MockSmsPrimitive {
    async fn send_sms(&self, _number: &str, _message: &str) -> ChannelResult<SmsSendResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.success {
            Ok(SmsSendResult::ok())
        } else {
            Ok(SmsSendResult::failure("Generic failure"))
        }
    }
}

/// URI opener that records every URI and opens them all, or none.
#[derive(Clone)]
pub struct MockUriOpener {
    opens: bool,
    opened: Arc<Mutex<Vec<String>>>,
}

impl MockUriOpener {
    pub fn working() -> Self {
        Self {
            opens: true,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn broken() -> Self {
        Self {
            opens: false,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UriOpener for MockUriOpener {
    async fn open(&self, uri: &str) -> ChannelResult<()> {
        self.opened.lock().unwrap().push(uri.to_string());
        if self.opens {
            Ok(())
        } else {
            Err(ChannelError::OpenFailed("No activity found to handle intent".to_string()))
        }
    }
}
