//! Integration tests for the SmsApiClient using mockito for HTTP mocking.

use animia_sms_dispatch::models::{SmsHistoryRecord, SmsStatus};
use animia_sms_dispatch::{SmsApiClient, SmsApiError};
use mockito::{Matcher, Server};

fn client(server: &Server) -> SmsApiClient {
    SmsApiClient::with_base_url(server.url(), "test-token".to_string())
}

fn sample_record() -> SmsHistoryRecord {
    SmsHistoryRecord {
        id: None,
        beneficiary_id: 42,
        beneficiary_name: Some("Asha Devi".to_string()),
        phone_number: "+919876543210".to_string(),
        message: "Hello, this message is for Asha Devi (Primary Phone):\n\nTest".to_string(),
        sms_type: "general".to_string(),
        contact_type: Some("primary".to_string()),
        channel: Some("app_intent".to_string()),
        status: SmsStatus::Sent,
        error_message: None,
        sent_at: "2024-11-02T10:00:00+00:00".to_string(),
    }
}

#[test]
fn test_store_beneficiary_sms() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/sms/beneficiary")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "beneficiary_id": 42,
            "phone_number": "+919876543210",
            "status": "sent",
            "contact_type": "primary"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": {"id": 9}}"#)
        .create();

    let result = client(&server).store_beneficiary_sms(&sample_record());

    mock.assert();
    assert!(result.is_ok());
}

#[test]
fn test_store_beneficiary_sms_rejected() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/sms/beneficiary")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "error": "Beneficiary not found"}"#)
        .create();

    let result = client(&server).store_beneficiary_sms(&sample_record());

    mock.assert();
    match result {
        Err(SmsApiError::Rejected(msg)) => assert_eq!(msg, "Beneficiary not found"),
        other => panic!("Expected Rejected, got: {:?}", other),
    }
}

#[test]
fn test_get_beneficiary_sms_history() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/sms/beneficiary/42/history")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "success": true,
            "data": [{
                "id": 3,
                "beneficiary_id": 42,
                "phone_number": "+919876543210",
                "message": "Reminder",
                "sms_type": "follow_up",
                "status": "failed",
                "error_message": "Cannot open SMS app",
                "sent_at": "2024-11-02T10:00:00Z"
            }]
        }"#,
        )
        .create();

    let history = client(&server).get_beneficiary_sms_history(42).unwrap();

    mock.assert();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, Some(3));
    assert_eq!(history[0].status, SmsStatus::Failed);
    assert_eq!(history[0].sms_type, "follow_up");
}

#[test]
fn test_get_sms_statistics() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/sms/statistics")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "success": true,
            "data": {
                "total_sms_sent": 120,
                "successful_sms": 110,
                "failed_sms": 10,
                "beneficiaries_contacted": 45,
                "last_sms_date": "2024-11-02T10:00:00Z"
            }
        }"#,
        )
        .create();

    let stats = client(&server).get_sms_statistics().unwrap();

    mock.assert();
    assert_eq!(stats.total_sms_sent, 120);
    assert_eq!(stats.failed_sms, 10);
    assert_eq!(stats.beneficiaries_contacted, 45);
}

#[test]
fn test_update_sms_status() {
    let mut server = Server::new();

    let mock = server
        .mock("PUT", "/api/sms/9/status")
        .match_body(Matcher::Json(serde_json::json!({
            "status": "delivered",
            "errorMessage": null
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create();

    let result = client(&server).update_sms_status(9, SmsStatus::Delivered, None);

    mock.assert();
    assert!(result.is_ok());
}

#[test]
fn test_get_beneficiary() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/beneficiaries/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "success": true,
            "beneficiary": {
                "id": 42,
                "short_id": "AN-0042",
                "name": "Asha Devi",
                "phone": "98765 43210",
                "alt_phone": "9876543211",
                "doctor_phone": null,
                "hb_level": 9.4,
                "category": "pregnant"
            }
        }"#,
        )
        .create();

    let beneficiary = client(&server).get_beneficiary(42).unwrap();

    mock.assert();
    assert_eq!(beneficiary.id, 42);
    assert_eq!(beneficiary.short_id.as_deref(), Some("AN-0042"));
    assert_eq!(beneficiary.phone.as_deref(), Some("98765 43210"));
    assert!(beneficiary.doctor_phone.is_none());
}

#[test]
fn test_get_beneficiary_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/beneficiaries/999")
        .with_status(404)
        .with_body(r#"{"success": false, "error": "Not found"}"#)
        .create();

    let result = client(&server).get_beneficiary(999);

    mock.assert();
    assert!(matches!(result, Err(SmsApiError::NotFound(_))));
}

#[test]
fn test_get_beneficiaries_with_limit() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/beneficiaries")
        .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "name": "Asha"}, {"id": 2, "name": "Meena", "phone": "9876500000"}]"#)
        .create();

    let beneficiaries = client(&server).get_beneficiaries(2).unwrap();

    mock.assert();
    assert_eq!(beneficiaries.len(), 2);
    assert_eq!(beneficiaries[1].phone.as_deref(), Some("9876500000"));
}

#[test]
fn test_send_sms_to_device() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/devices/relay-01/sms")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "phoneNumber": "+919876543210",
            "message": "Test"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "error": "SIM not ready"}"#)
        .create();

    let response = client(&server)
        .send_sms_to_device("relay-01", "+919876543210", "Test")
        .unwrap();

    mock.assert();
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("SIM not ready"));
}

#[test]
fn test_unauthorized() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/sms/statistics")
        .with_status(401)
        .with_body(r#"{"error": "Invalid token"}"#)
        .create();

    let c = client(&server);
    let result = c.get_sms_statistics();

    mock.assert();
    assert!(matches!(result, Err(SmsApiError::Unauthorized)));
    assert_eq!(c.metrics().http_requests_total(), 1);
    assert_eq!(c.metrics().http_errors_total(), 1);
}

#[test]
fn test_rate_limited() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/beneficiaries/1")
        .with_status(429)
        .create();

    let result = client(&server).get_beneficiary(1);

    mock.assert();
    assert!(matches!(result, Err(SmsApiError::RateLimitExceeded)));
}

#[test]
fn test_server_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/api/sms/beneficiary/5/history")
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let result = client(&server).get_beneficiary_sms_history(5);

    mock.assert();
    match result {
        Err(SmsApiError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}
