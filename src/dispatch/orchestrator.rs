use crate::contacts::ContactExtractor;
use crate::dispatch::{DispatchEvent, DispatchObserver, DispatchSettings, SmartDispatcher};
use crate::domain::{NormalizedPhone, ValidationError};
use crate::models::{
    Beneficiary, BeneficiaryReport, BulkReport, Contact, ContactBatchReport, ContactKind,
    DispatchOutcome, BULK_SMS_TYPE, GENERAL_SMS_TYPE,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Runs the dispatcher over many destinations.
///
/// Destinations are sent to one at a time with `inter_send_delay` between
/// them. A failed destination never stops the loop.
pub struct BulkOrchestrator {
    dispatcher: Arc<SmartDispatcher>,
    extractor: ContactExtractor,
    inter_send_delay: Duration,
    observers: Vec<Arc<dyn DispatchObserver>>,
}

struct BeneficiaryContext<'a> {
    id: i64,
    name: &'a str,
}

impl BulkOrchestrator {
    pub fn new(dispatcher: Arc<SmartDispatcher>, extractor: ContactExtractor) -> Self {
        Self {
            dispatcher,
            extractor,
            inter_send_delay: DispatchSettings::default().inter_send_delay,
            observers: Vec::new(),
        }
    }

    pub fn with_inter_send_delay(mut self, delay: Duration) -> Self {
        self.inter_send_delay = delay;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn extractor(&self) -> &ContactExtractor {
        &self.extractor
    }

    pub fn dispatcher(&self) -> &SmartDispatcher {
        &self.dispatcher
    }

    /// Send `template`, personalized per contact, to each contact in order.
    pub async fn send_to_contacts(
        &self,
        contacts: &[Contact],
        template: &str,
        prefer_native: bool,
    ) -> ContactBatchReport {
        self.run(contacts, template, prefer_native, GENERAL_SMS_TYPE, None)
            .await
    }

    /// Send to every valid phone field of `beneficiary`.
    pub async fn send_to_beneficiary(
        &self,
        beneficiary: &Beneficiary,
        message: &str,
        prefer_native: bool,
    ) -> BeneficiaryReport {
        self.send_to_beneficiary_as(beneficiary, message, GENERAL_SMS_TYPE, prefer_native)
            .await
    }

    /// [`send_to_beneficiary`](Self::send_to_beneficiary) with the
    /// `sms_type` (registration, follow_up, screening, ...) carried on
    /// every dispatch event.
    pub async fn send_to_beneficiary_as(
        &self,
        beneficiary: &Beneficiary,
        message: &str,
        sms_type: &str,
        prefer_native: bool,
    ) -> BeneficiaryReport {
        let name = beneficiary.display_name();
        let contacts = self.extractor.extract_contacts(beneficiary);

        if contacts.is_empty() {
            tracing::info!(beneficiary_id = beneficiary.id, "No contacts found for beneficiary");
            return BeneficiaryReport::no_contacts(beneficiary.id, name);
        }

        tracing::info!(
            beneficiary_id = beneficiary.id,
            contacts = contacts.len(),
            "Sending SMS to beneficiary contacts"
        );
        let context = BeneficiaryContext {
            id: beneficiary.id,
            name,
        };
        let batch = self
            .run(&contacts, message, prefer_native, sms_type, Some(context))
            .await;
        BeneficiaryReport::new(beneficiary.id, name, batch)
    }

    /// Send to every beneficiary in turn, tagged `bulk`.
    pub async fn send_to_beneficiaries(
        &self,
        beneficiaries: &[Beneficiary],
        message: &str,
        prefer_native: bool,
    ) -> BulkReport {
        self.send_to_beneficiaries_as(beneficiaries, message, BULK_SMS_TYPE, prefer_native)
            .await
    }

    pub async fn send_to_beneficiaries_as(
        &self,
        beneficiaries: &[Beneficiary],
        message: &str,
        sms_type: &str,
        prefer_native: bool,
    ) -> BulkReport {
        let mut reports = Vec::with_capacity(beneficiaries.len());
        for (i, beneficiary) in beneficiaries.iter().enumerate() {
            if i > 0 {
                self.pause().await;
            }
            reports.push(
                self.send_to_beneficiary_as(beneficiary, message, sms_type, prefer_native)
                    .await,
            );
        }

        let report = BulkReport::new(reports);
        tracing::info!(
            beneficiaries = report.summary.beneficiaries(),
            successful = report.summary.successful(),
            failed = report.summary.failed(),
            "Bulk SMS completed"
        );
        report
    }

    /// Send `message` unchanged to one raw number.
    ///
    /// The number is validated before any channel is touched.
    pub async fn send_to_number(
        &self,
        raw: &str,
        message: &str,
        prefer_native: bool,
    ) -> Result<DispatchOutcome, ValidationError> {
        let number = self.extractor.normalizer().parse(raw)?;
        let contact = Contact::new(ContactKind::Single, number, "");
        Ok(self
            .dispatch_one(&contact, message, prefer_native, GENERAL_SMS_TYPE, None)
            .await)
    }

    /// Send `message` unchanged to each number in order.
    pub async fn send_to_numbers(
        &self,
        numbers: &[NormalizedPhone],
        message: &str,
        prefer_native: bool,
    ) -> ContactBatchReport {
        let contacts: Vec<Contact> = numbers
            .iter()
            .map(|n| Contact::new(ContactKind::Single, n.clone(), ""))
            .collect();
        self.run(&contacts, message, prefer_native, BULK_SMS_TYPE, None)
            .await
    }

    async fn run(
        &self,
        contacts: &[Contact],
        template: &str,
        prefer_native: bool,
        sms_type: &str,
        context: Option<BeneficiaryContext<'_>>,
    ) -> ContactBatchReport {
        let mut outcomes = Vec::with_capacity(contacts.len());
        for (i, contact) in contacts.iter().enumerate() {
            if i > 0 {
                self.pause().await;
            }
            outcomes.push(
                self.dispatch_one(contact, template, prefer_native, sms_type, context.as_ref())
                    .await,
            );
        }
        ContactBatchReport::new(outcomes)
    }

    async fn dispatch_one(
        &self,
        contact: &Contact,
        template: &str,
        prefer_native: bool,
        sms_type: &str,
        context: Option<&BeneficiaryContext<'_>>,
    ) -> DispatchOutcome {
        let message = match contact.kind() {
            ContactKind::Single => template.to_string(),
            _ => contact.personalize(template),
        };

        let attempt = self
            .dispatcher
            .dispatch_detailed(contact.number(), &message, prefer_native)
            .await;
        let outcome = DispatchOutcome {
            contact: contact.clone(),
            channel_used: attempt.channel_used,
            success: attempt.success,
            error_detail: attempt.error_detail,
        };

        if !self.observers.is_empty() {
            let event = DispatchEvent {
                beneficiary_id: context.map(|c| c.id),
                beneficiary_name: context.map(|c| c.name.to_string()),
                message,
                sms_type: sms_type.to_string(),
                outcome: outcome.clone(),
                completed_at: Utc::now(),
            };
            for observer in &self.observers {
                observer.on_dispatch_complete(&event);
            }
        }

        outcome
    }

    async fn pause(&self) {
        if !self.inter_send_delay.is_zero() {
            tokio::time::sleep(self.inter_send_delay).await;
        }
    }
}
