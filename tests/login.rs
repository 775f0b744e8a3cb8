//! Login tests against a wiremock Interacta API.

use interactapi::{InteractaClient, InteractaError, RawResponse, ServiceAccount, Settings};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREDENTIALS: &str = "/portal/api/auth/internal/login/credentials";
const SERVICE: &str = "/portal/api/auth/internal/login/service";

fn credential_client(server: &MockServer) -> InteractaClient {
    let settings = Settings::new(&server.uri()).with_credentials("user@example.org", "hunter2");
    InteractaClient::new(settings).unwrap()
}

#[tokio::test]
async fn test_credential_login_stores_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "username": "user@example.org",
            "password": "hunter2"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "abc123"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = credential_client(&mock_server);
    assert!(!client.is_authenticated());

    let token = client.login().await.unwrap();
    assert_eq!(token, "abc123");
    assert_eq!(client.access_token(), Some("abc123"));
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "abc123"})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/portal/api/external/v2/admin/data/business-units"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = credential_client(&mock_server);
    client.login().await.unwrap();

    let raw = interactapi::list_business_units(&client).await.unwrap();
    assert_eq!(raw.status.as_u16(), 200);
}

#[tokio::test]
async fn test_login_not_found_reports_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such page"))
        .mount(&mock_server)
        .await;

    let mut client = credential_client(&mock_server);
    let err = client.login().await.unwrap_err();

    assert!(matches!(err, InteractaError::Login { .. }));
    assert_eq!(err.status(), Some(404));
    let message = err.to_string();
    let url = format!("{}{CREDENTIALS}", mock_server.uri());
    assert!(message.contains(&format!("url: {url}")), "{message}");
    assert!(message.contains("no such page"), "{message}");
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_login_without_access_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"wrong_key": 1})))
        .mount(&mock_server)
        .await;

    let mut client = credential_client(&mock_server);
    let err = client.login().await.unwrap_err();

    match err {
        InteractaError::Login { message, response } => {
            assert!(message.contains("No accessToken"), "{message}");
            let raw: Box<RawResponse> = response.unwrap();
            assert!(raw.body.contains("wrong_key"));
        }
        other => panic!("Expected Login error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_login_keeps_previous_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "x"})))
        .mount(&mock_server)
        .await;

    let mut client = credential_client(&mock_server);
    client.set_access_token("old");

    let err = client.login().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(client.access_token(), Some("old"));

    let err = client.login().await.unwrap_err();
    assert!(err.to_string().contains("No accessToken"), "{err}");
    assert_eq!(client.access_token(), Some("old"));
}

#[tokio::test]
async fn test_login_transport_error() {
    let settings = Settings::new("http://127.0.0.1:1").with_credentials("u", "p");
    let mut client = InteractaClient::new(settings).unwrap();

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, InteractaError::Login { response: None, .. }));
    assert!(err.to_string().contains("url: http://127.0.0.1:1/portal/api/"));
}

#[tokio::test]
async fn test_service_account_login_sends_assertion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SERVICE))
        .and(body_string_contains("jwtAssertion"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "svc-token"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(CREDENTIALS))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let account = ServiceAccount::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/service_account.json"
    ))
    .unwrap();
    // Service account wins over credentials.
    let settings = Settings::new(&mock_server.uri())
        .with_credentials("ignored", "ignored")
        .with_service_account(account);
    let mut client = InteractaClient::new(settings).unwrap();

    let token = client.login().await.unwrap();
    assert_eq!(token, "svc-token");
}

#[tokio::test]
async fn test_login_without_any_method_is_config_error() {
    let mut client = InteractaClient::new(Settings::new("https://example.org")).unwrap();

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, InteractaError::Config(_)));
}
