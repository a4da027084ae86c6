mod api_beneficiary_repository;
mod api_history_repository;
mod traits;

pub use api_beneficiary_repository::ApiBeneficiaryRepository;
pub use api_history_repository::ApiHistoryRepository;
pub use traits::{BeneficiaryRepository, HistoryRepository};
