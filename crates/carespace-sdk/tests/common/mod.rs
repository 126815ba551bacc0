/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for carespace-sdk tests

#![allow(dead_code)]

use std::time::Duration;

use carespace_sdk::{CarespaceClient, CarespaceConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Config pointed at the mock server with instant retries
pub fn test_config(server: &MockServer) -> CarespaceConfig {
    CarespaceConfig::default()
        .with_base_url(server.uri())
        .with_api_key(TEST_API_KEY)
        .with_retry(2, Duration::ZERO)
}

pub fn test_client(server: &MockServer) -> CarespaceClient {
    CarespaceClient::new(test_config(server)).expect("client should build")
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-01-15T10:30:00Z",
        "email": format!("{id}@clinic.test"),
        "name": "Jane Doe",
        "first_name": "Jane",
        "last_name": "Doe",
        "role": "provider",
        "is_active": true
    })
}

pub fn client_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Sam Patient",
        "email": "sam@example.test",
        "assigned_programs": ["p-1"],
        "provider_id": "u-1",
        "is_active": true,
        "total_sessions": 4
    })
}

pub fn program_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Knee rehab",
        "category": "rehabilitation",
        "difficulty": "beginner",
        "duration": 30,
        "exercises": [],
        "is_template": false,
        "is_public": true,
        "creator_id": "u-1",
        "tags": ["knee"]
    })
}

pub fn envelope(data: Value) -> Value {
    json!({"success": true, "data": data})
}

pub fn page(items: Vec<Value>, total: u64) -> Value {
    json!({
        "success": true,
        "data": items,
        "page": 1,
        "limit": 20,
        "total": total,
        "total_pages": 1,
        "has_next": false,
        "has_previous": false
    })
}
