//! Delivery channels.
//!
//! Two drivers implement [`DeliveryChannel`]:
//!
//! - [`NativeChannel`]: direct send through a platform SMS primitive, gated
//!   on the SMS permission, with bounded retry
//! - [`AppIntentChannel`]: opens the system messaging app pre-filled with
//!   recipient and body; success only means the compose screen opened
//!
//! Platform capabilities (permission state, the send primitive, the URI
//! opener) are injected as trait objects so the platform is chosen once at
//! construction time.

mod app_intent;
mod native;
mod opener;
mod permission;
mod relay;
mod traits;

pub use app_intent::{AppIntentChannel, TargetPlatform};
pub use native::NativeChannel;
pub use opener::SystemUriOpener;
pub use permission::StaticPermissionProvider;
pub use relay::DeviceRelaySms;
pub use traits::{DeliveryChannel, PermissionProvider, SmsPrimitive, SmsSendResult, UriOpener};
