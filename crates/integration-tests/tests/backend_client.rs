//! Requests the backend client sends to the hosted platform.

#![allow(clippy::unwrap_used)]

use craftpage_backend::{BackendClient, BackendError, Order};
use craftpage_core::{UserId, UserRole};
use craftpage_integration_tests::{
    ACCESS_TOKEN, ANON_KEY, SERVICE_KEY, USER_ID, backend_config, inquiry_json, session_json,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_password_sign_in_sends_anon_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON_KEY))
        .and(body_json(json!({ "email": "admin@example.com", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(Some("admin"))))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false)).unwrap();
    let session = client
        .sign_in_with_password("admin@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(session.access_token.expose_secret(), ACCESS_TOKEN);
    assert_eq!(session.user.role(), Some(UserRole::Admin));
    assert_eq!(session.user.full_name(), Some("Kim Admin"));
}

#[tokio::test]
async fn test_rejected_sign_in_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false)).unwrap();
    let err = client
        .sign_in_with_password("admin@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Auth { status: 400, .. }));
    assert_eq!(err.provider_message(), Some("Invalid login credentials"));
}

#[tokio::test]
async fn test_table_fetch_uses_user_token_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/contact_inquiries"))
        .and(query_param("status", "eq.unread"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "5"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([inquiry_json(1, "unread")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false))
        .unwrap()
        .with_access_token(&SecretString::from(ACCESS_TOKEN));
    let rows: Vec<Value> = client
        .from("contact_inquiries")
        .select("*")
        .eq("status", "unread")
        .order("created_at", Order::Desc)
        .limit(5)
        .fetch()
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["subject"], "Question 1");
}

#[tokio::test]
async fn test_count_reads_content_range() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/user_profiles"))
        .and(header("prefer", "count=exact"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-range", "*/42"))
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false)).unwrap();
    assert_eq!(client.from("user_profiles").count().await.unwrap(), 42);
}

#[tokio::test]
async fn test_upsert_names_conflict_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/site_content"))
        .and(query_param("on_conflict", "section,content_key"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false)).unwrap();
    let row = json!({ "section": "hero", "content_key": "main", "content_value": {} });
    client
        .from("site_content")
        .upsert(&row, "section,content_key")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_gateway_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table user_profiles"
        })))
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false)).unwrap();
    let err = client
        .from("user_profiles")
        .eq("id", USER_ID)
        .update(&json!({ "role": "admin" }))
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Api { status: 403, .. }));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_role_claim_requires_service_key() {
    let server = MockServer::start().await;
    let user_id: UserId = USER_ID.parse().unwrap();

    let anon_only = BackendClient::new(&backend_config(&server, false)).unwrap();
    assert!(matches!(
        anon_only.set_role_claim(user_id, UserRole::Admin).await,
        Err(BackendError::MissingServiceKey)
    ));

    Mock::given(method("PUT"))
        .and(path(format!("/auth/v1/admin/users/{USER_ID}")))
        .and(header("authorization", format!("Bearer {SERVICE_KEY}").as_str()))
        .and(body_json(json!({ "app_metadata": { "role": "admin" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": USER_ID })))
        .expect(1)
        .mount(&server)
        .await;

    let with_key = BackendClient::new(&backend_config(&server, true)).unwrap();
    with_key
        .set_role_claim(user_id, UserRole::Admin)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rpc_posts_arguments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/get_admin_users"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(&backend_config(&server, false)).unwrap();
    let users: Vec<Value> = client.rpc("get_admin_users", &json!({})).await.unwrap();
    assert!(users.is_empty());
}
