use crate::channels::traits::PermissionProvider;
use async_trait::async_trait;

/// Permission state fixed at construction.
///
/// Used where no interactive prompt exists (relay devices, headless hosts):
/// a request simply reports the configured state.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissionProvider {
    granted: bool,
}

impl StaticPermissionProvider {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }

    pub fn granted() -> Self {
        Self::new(true)
    }

    pub fn denied() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl PermissionProvider for StaticPermissionProvider {
    async fn check(&self) -> bool {
        self.granted
    }

    async fn request(&self) -> bool {
        tracing::debug!(granted = self.granted, "SMS permission requested");
        self.granted
    }
}
