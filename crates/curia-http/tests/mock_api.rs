//! Mock API tests for the HTTP transport.
//!
//! These use wiremock to simulate the admin REST API and exercise the
//! transport without network access or real credentials.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use curia_core::traits::{Backend, Session};
use curia_core::{ApiUrl, Credentials, Error, ListPage, Outcome, Patch, RecordKey, catalog};
use curia_http::HttpBackend;

/// Helper to build an API URL pointing at a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

async fn logged_in(server: &MockServer) -> curia_http::HttpSession {
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "accessToken": "test-access-token",
            "user": { "_id": "admin1", "email": "admin@example.com" }
        })))
        .mount(server)
        .await;

    let backend = HttpBackend::new(mock_api_url(server));
    backend
        .login(Credentials::new("admin@example.com", "secret123"))
        .await
        .unwrap()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "secret123",
            "mode": "website"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "accessToken": "test-access-token",
            "user": { "_id": "admin1" }
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(mock_api_url(&server));
    let session = backend
        .login(Credentials::new("admin@example.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(session.account().as_str(), "admin1");
    assert_eq!(session.token(), "test-access-token");
}

#[tokio::test]
async fn login_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(mock_api_url(&server));
    let err = backend
        .login(Credentials::new("bad@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn login_unsuccessful_body_is_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(mock_api_url(&server));
    let err = backend
        .login(Credentials::new("admin@example.com", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
}

// ============================================================================
// Collection operations
// ============================================================================

#[tokio::test]
async fn fetch_collection_unwraps_envelope() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/user/all"))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                { "_id": "u1", "firstname": "Ada" },
                { "_id": "u2", "firstname": "Grace" }
            ]
        })))
        .mount(&server)
        .await;

    let records = session.fetch_collection(&catalog::users()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].key("_id").unwrap().as_str(), "u1");
}

#[tokio::test]
async fn fetch_collection_missing_envelope_is_empty() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/event/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let records = session.fetch_collection(&catalog::events()).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_collection_expired_token_is_auth_error() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/user/all"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "jwt expired"
        })))
        .mount(&server)
        .await;

    let err = session.fetch_collection(&catalog::users()).await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn delete_record_hits_the_resource_path() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/user/u7"))
        .and(header("authorization", "Bearer test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    session
        .delete_record(&catalog::users(), &RecordKey::new("u7"))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_missing_record_is_not_found() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/user/u404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "User not found"
        })))
        .mount(&server)
        .await;

    let err = session
        .delete_record(&catalog::users(), &RecordKey::new("u404"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn update_record_unwraps_data_envelope() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("PUT"))
        .and(path("/user/u3"))
        .and(body_json(json!({ "status": "active" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User updated",
            "data": { "_id": "u3", "status": "active" }
        })))
        .mount(&server)
        .await;

    let patch = Patch::default().set("status", json!("active"));
    let updated = session
        .update_record(&catalog::users(), &RecordKey::new("u3"), &patch)
        .await
        .unwrap();

    assert_eq!(updated.get("status").unwrap(), "active");
}

#[tokio::test]
async fn update_rejection_surfaces_the_server_message() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("PUT"))
        .and(path("/service/s1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "title is required"
        })))
        .mount(&server)
        .await;

    let patch = Patch::default().set("title", json!(""));
    let err = session
        .update_record(&catalog::services(), &RecordKey::new("s1"), &patch)
        .await
        .unwrap_err();

    match err {
        Error::Validation { ref message } => assert_eq!(message, "title is required"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// Engine against the transport
// ============================================================================

#[tokio::test]
async fn list_page_delete_round_trip() {
    let server = MockServer::start().await;
    let session = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/user/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                { "_id": "u1", "firstname": "Ada", "lastname": "L", "email": "a@x.com", "phone": "1" },
                { "_id": "u2", "firstname": "Grace", "lastname": "H", "email": "g@x.com", "phone": "2" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = ListPage::new(catalog::users());
    page.refresh(&session).await.unwrap();
    assert_eq!(page.records().len(), 2);

    let u1 = RecordKey::new("u1");
    page.begin_delete(u1.clone()).unwrap();
    let outcome = page.commit(&u1, &session).await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(page.records().len(), 1);
    assert_eq!(page.records()[0].key("_id").unwrap().as_str(), "u2");
}
