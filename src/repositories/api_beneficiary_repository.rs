use crate::client::AsyncSmsApiClient;
use crate::error::SmsApiResult;
use crate::models::Beneficiary;
use crate::repositories::traits::BeneficiaryRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Beneficiary repository implementation using the Animia backend client.
pub struct ApiBeneficiaryRepository {
    client: Arc<dyn AsyncSmsApiClient>,
}

impl ApiBeneficiaryRepository {
    pub fn new(client: Arc<dyn AsyncSmsApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BeneficiaryRepository for ApiBeneficiaryRepository {
    async fn get(&self, id: i64) -> SmsApiResult<Beneficiary> {
        self.client.get_beneficiary(id).await
    }

    async fn list(&self, limit: usize) -> SmsApiResult<Vec<Beneficiary>> {
        self.client.get_beneficiaries(limit).await
    }
}
