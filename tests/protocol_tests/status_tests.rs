//! Tests for StatusResponse
//!
//! These tests verify:
//! - Decoding of the status JSON document
//! - Optional favicon and player sample
//! - Rejection of malformed documents

use mcstatus::protocol::StatusResponse;
use mcstatus::McStatusError;

#[test]
fn test_decode_full_document() {
    let status = StatusResponse::from_json(
        r#"{
            "version": {"name": "1.20.4", "protocol": 765},
            "players": {
                "max": 100,
                "online": 2,
                "sample": [
                    {"name": "Alice", "id": "4566e69f-c907-48ee-8d71-d7ba5aa00d20"},
                    {"name": "Bob", "id": "b7e3b1d5-3e4c-4a5f-9f0e-3c5f6a7b8c9d"}
                ]
            },
            "description": {"text": "Hello, world!"},
            "favicon": "data:image/png;base64,AAAA",
            "enforcesSecureChat": true
        }"#,
    )
    .unwrap();

    assert_eq!(status.version.name, "1.20.4");
    assert_eq!(status.version.protocol, 765);
    assert_eq!(status.players.max, 100);
    assert_eq!(status.players.online, 2);
    let sample = status.players.sample.unwrap();
    assert_eq!(sample.len(), 2);
    assert_eq!(sample[0].name, "Alice");
    assert_eq!(sample[1].id, "b7e3b1d5-3e4c-4a5f-9f0e-3c5f6a7b8c9d");
    assert_eq!(status.description.text, "Hello, world!");
    assert_eq!(status.favicon.as_deref(), Some("data:image/png;base64,AAAA"));
}

#[test]
fn test_decode_minimal_document() {
    let status = StatusResponse::from_json(
        r#"{"version":{"name":"1.8.9","protocol":47},
            "players":{"max":20,"online":0},
            "description":"A Minecraft Server"}"#,
    )
    .unwrap();

    assert!(status.favicon.is_none());
    assert!(status.players.sample.is_none());
    assert_eq!(status.description.text, "A Minecraft Server");
}

#[test]
fn test_malformed_json_is_invalid_payload() {
    let result = StatusResponse::from_json("{\"version\": ");
    assert!(matches!(result, Err(McStatusError::InvalidStatusPayload(_))));
}

#[test]
fn test_missing_required_field_is_invalid_payload() {
    let result = StatusResponse::from_json(r#"{"description":"x","players":{"max":1,"online":0}}"#);
    assert!(matches!(result, Err(McStatusError::InvalidStatusPayload(_))));
}
