//! Hand-written trait implementations shared by the integration tests.

#![allow(dead_code)]

mod mock_beneficiary_repository;
mod mock_channel;
mod mock_history_repository;
mod mock_platform;

pub use mock_beneficiary_repository::MockBeneficiaryRepository;
pub use mock_channel::MockChannel;
pub use mock_history_repository::MockHistoryRepository;
pub use mock_platform::{MockPermission, MockSmsPrimitive, MockUriOpener};
