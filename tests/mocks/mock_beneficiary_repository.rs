use animia_sms_dispatch::error::{SmsApiError, SmsApiResult};
use animia_sms_dispatch::models::Beneficiary;
use animia_sms_dispatch::repositories::BeneficiaryRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory beneficiary store.
#[derive(Clone, Default)]
pub struct MockBeneficiaryRepository {
    beneficiaries: Arc<Mutex<Vec<Beneficiary>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockBeneficiaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_beneficiary(&self, beneficiary: Beneficiary) {
        self.beneficiaries.lock().unwrap().push(beneficiary);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl BeneficiaryRepository for MockBeneficiaryRepository {
    async fn get(&self, id: i64) -> SmsApiResult<Beneficiary> {
        self.track_call("get");
        self.beneficiaries
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| SmsApiError::NotFound(format!("Beneficiary {}", id)))
    }

    async fn list(&self, limit: usize) -> SmsApiResult<Vec<Beneficiary>> {
        self.track_call("list");
        Ok(self
            .beneficiaries
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }
}
