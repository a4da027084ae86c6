//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the dispatch path. They provide a clean boundary between
//! the MCP handlers and the data access layer.

mod sms_service;

pub use sms_service::{
    BeneficiaryContacts, BeneficiarySendResponse, BulkSendRequest, BulkSendResponse,
    NumberSendResponse, PhoneCheck, SmsService, SmsServiceImpl,
};
