//! Integration tests for CalDAV client using WireMock
//!
//! These tests mock CalDAV server responses to PUT requests to verify
//! client behavior without requiring an actual CalDAV server.

use chrono::NaiveDate;
use domain::BirthdayEvent;
use integration_caldav::{
    CalDavClient, CalDavConfig, CalDavError, HttpCalDavClient, build_birthday_calendar,
};
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_string_contains, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(base_url: &str) -> CalDavConfig {
    CalDavConfig {
        server_url: format!("{base_url}/calendars/test_user/birthdays/"),
        username: "test_user".to_string(),
        password: "test_pass".to_string(),
        verify_certs: true,
        timeout_secs: 5,
    }
}

#[allow(clippy::expect_used)]
fn test_client(base_url: &str) -> HttpCalDavClient {
    HttpCalDavClient::new(test_config(base_url)).expect("test client")
}

#[allow(clippy::expect_used)]
fn birthday_event() -> BirthdayEvent {
    BirthdayEvent::all_day(
        Uuid::from_u128(0x1000),
        "Anna hat Geburtstag (36)",
        NaiveDate::from_ymd_opt(2026, 5, 1).expect("date"),
    )
    .expect("event")
}

// =============================================================================
// put_object Tests
// =============================================================================

#[tokio::test]
async fn put_object_created() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());
    let event = birthday_event();

    Mock::given(method("PUT"))
        .and(path(format!(
            "/calendars/test_user/birthdays/{}",
            event.file_name()
        )))
        .and(header("Content-Type", "text/calendar; charset=utf-8"))
        .and(basic_auth("test_user", "test_pass"))
        .and(body_string_contains("SUMMARY:Anna hat Geburtstag (36)"))
        .and(body_string_contains("DTSTART;VALUE=DATE:20260501"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let body = build_birthday_calendar(&event).into_bytes();
    let result = client.put_object(&event.file_name(), body).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn put_object_replaces_existing() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let body = build_birthday_calendar(&birthday_event()).into_bytes();
    assert!(client.put_object("a.ics", body.clone()).await.is_ok());
    assert!(client.put_object("a.ics", body).await.is_ok());
}

#[tokio::test]
async fn put_object_unauthorized() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.put_object("a.ics", b"BEGIN:VCALENDAR".to_vec()).await;
    assert!(matches!(result, Err(CalDavError::AuthenticationFailed)));
}

#[tokio::test]
async fn put_object_missing_calendar() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let result = client.put_object("a.ics", Vec::new()).await;
    assert!(matches!(result, Err(CalDavError::CalendarNotFound(_))));
}

#[tokio::test]
async fn put_object_server_error() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.put_object("a.ics", Vec::new()).await;
    assert!(matches!(result, Err(CalDavError::RequestFailed(msg)) if msg.contains("500")));
}
