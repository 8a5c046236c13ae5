//! Integration tests for the subscriber endpoint helpers.
//!
//! These simulate the two kinds of requests the provider sends: the
//! verification handshake and signed notification batches.

use fitbit_api::webhooks::{
    parse_notifications, sign_body, verify_notification, verify_signature, verify_subscriber_code,
    WebhookError,
};
use fitbit_api::{ClientId, ClientSecret, FitbitConfig, RedirectUrl};

const CLIENT_SECRET: &str = "0123456789abcdef0123456789abcdef";

const NOTIFICATIONS: &str = r#"[
    {"collectionType":"activities","date":"2024-01-05","ownerId":"ABC123","ownerType":"user","subscriptionId":"1"},
    {"collectionType":"body","date":"2024-01-05","ownerId":"ABC123","ownerType":"user","subscriptionId":"1"}
]"#;

fn create_config() -> FitbitConfig {
    FitbitConfig::builder()
        .client_id(ClientId::new("23ABCD").unwrap())
        .client_secret(ClientSecret::new(CLIENT_SECRET).unwrap())
        .redirect_url(RedirectUrl::new("https://app.example.com/callback").unwrap())
        .build()
        .unwrap()
}

/// What a subscriber endpoint answers to `GET ?verify=<code>`.
fn verification_status(expected: &str, received: &str) -> u16 {
    match verify_subscriber_code(expected, received) {
        Ok(()) => 204,
        Err(e) => e.status_code(),
    }
}

#[test]
fn test_verification_handshake() {
    let code = "0b6f2a4c9d";
    assert_eq!(verification_status(code, code), 204);
    assert_eq!(verification_status(code, "incorrect"), 404);
}

#[test]
fn test_signed_notification_batch() {
    let config = create_config();
    let body = NOTIFICATIONS.as_bytes();
    let signature = sign_body(body, CLIENT_SECRET);

    let notifications = verify_notification(&config, body, &signature).unwrap();

    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].collection_type, "activities");
    assert_eq!(notifications[1].collection_type, "body");
    assert!(notifications.iter().all(|n| n.owner_id == "ABC123"));
}

#[test]
fn test_notification_signed_with_other_secret_is_rejected() {
    let config = create_config();
    let body = NOTIFICATIONS.as_bytes();
    let signature = sign_body(body, "not-the-client-secret");

    let error = verify_notification(&config, body, &signature).unwrap_err();

    assert!(matches!(error, WebhookError::InvalidSignature));
    assert_eq!(error.status_code(), 404);
}

#[test]
fn test_signature_header_whitespace_is_tolerated() {
    let body = NOTIFICATIONS.as_bytes();
    let signature = format!("{}\r\n", sign_body(body, CLIENT_SECRET));

    assert!(verify_signature(body, &signature, CLIENT_SECRET).is_ok());
}

#[test]
fn test_malformed_body_with_valid_signature() {
    let config = create_config();
    let body = b"not json";
    let signature = sign_body(body, CLIENT_SECRET);

    let error = verify_notification(&config, body, &signature).unwrap_err();

    assert!(matches!(error, WebhookError::InvalidPayload(_)));
    assert_eq!(error.status_code(), 400);
    assert!(parse_notifications(body).is_err());
}
