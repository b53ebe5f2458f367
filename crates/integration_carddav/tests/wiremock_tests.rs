//! Integration tests for the CardDAV client using WireMock

use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_carddav::{
    CardDavClient, CardDavConfig, CardDavError, HttpCardDavClient, parse_vcards,
};

/// Helper to create a test client against a mock server
#[allow(clippy::expect_used)]
fn test_client(server_url: &str) -> HttpCardDavClient {
    let config = CardDavConfig {
        server_url: format!("{server_url}/addressbooks/testuser/contacts/"),
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        verify_certs: false,
        timeout_secs: 5,
    };
    HttpCardDavClient::new(config).expect("test client")
}

fn propfind_response(hrefs: &[&str]) -> String {
    let responses: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r"<D:response>
  <D:href>{href}</D:href>
  <D:propstat>
    <D:prop><D:getcontenttype>text/vcard</D:getcontenttype></D:prop>
    <D:status>HTTP/1.1 200 OK</D:status>
  </D:propstat>
</D:response>"
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<D:multistatus xmlns:D="DAV:">
{responses}
</D:multistatus>"#
    )
}

// === list_files Tests ===

#[tokio::test]
async fn list_files_returns_member_names() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PROPFIND"))
        .and(path("/addressbooks/testuser/contacts/"))
        .and(header("Depth", "1"))
        .and(basic_auth("testuser", "testpass"))
        .respond_with(ResponseTemplate::new(207).set_body_string(propfind_response(&[
            "/addressbooks/testuser/contacts/",
            "/addressbooks/testuser/contacts/anna.vcf",
            "/addressbooks/testuser/contacts/bernd.vcf",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let files = client.list_files("/").await.expect("files");
    assert_eq!(files, vec!["anna.vcf", "bernd.vcf"]);
}

#[tokio::test]
async fn list_files_empty_collection() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PROPFIND"))
        .respond_with(
            ResponseTemplate::new(207)
                .set_body_string(propfind_response(&["/addressbooks/testuser/contacts/"])),
        )
        .mount(&server)
        .await;

    let files = client.list_files("/").await.expect("files");
    assert!(files.is_empty());
}

#[tokio::test]
async fn list_files_unauthorized() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.list_files("/").await.unwrap_err();
    assert!(matches!(err, CardDavError::AuthenticationFailed));
}

#[tokio::test]
async fn list_files_not_found() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.list_files("/missing/").await.unwrap_err();
    assert!(matches!(err, CardDavError::AddressBookNotFound(p) if p == "/missing/"));
}

#[tokio::test]
async fn list_files_server_error() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list_files("/").await.unwrap_err();
    assert!(matches!(err, CardDavError::RequestFailed(_)));
}

// === download_file Tests ===

#[tokio::test]
async fn download_file_returns_bytes() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    let vcard = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Anna\r\nBDAY:1990-05-01\r\nUID:a\r\nEND:VCARD\r\n";

    Mock::given(method("GET"))
        .and(path("/addressbooks/testuser/contacts/anna.vcf"))
        .and(basic_auth("testuser", "testpass"))
        .respond_with(ResponseTemplate::new(200).set_body_string(vcard))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client.download_file("/anna.vcf").await.expect("download");
    let text = String::from_utf8(bytes).expect("utf-8");
    let cards = parse_vcards(&text).expect("cards");

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].full_name.as_deref(), Some("Anna"));
    assert_eq!(cards[0].birthday.as_deref(), Some("1990-05-01"));
}

#[tokio::test]
async fn download_file_not_found() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.download_file("/gone.vcf").await.unwrap_err();
    assert!(matches!(err, CardDavError::FileNotFound(p) if p == "/gone.vcf"));
}

#[tokio::test]
async fn download_file_connection_refused() {
    let client = test_client("http://127.0.0.1:1");

    let err = client.download_file("/anna.vcf").await.unwrap_err();
    assert!(matches!(
        err,
        CardDavError::ConnectionFailed(_) | CardDavError::Timeout
    ));
}
