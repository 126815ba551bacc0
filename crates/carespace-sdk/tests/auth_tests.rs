/*
[INPUT]:  Mock authentication responses
[OUTPUT]: Test results for auth flow
[POS]:    Integration tests - authentication
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use carespace_sdk::{
    CarespaceClient, CarespaceError, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
    LogoutRequest, RefreshTokenRequest, ResetPasswordRequest,
};
use common::{setup_mock_server, test_config, user_json};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn anonymous_client(server: &MockServer) -> CarespaceClient {
    let mut config = test_config(server);
    config.api_key = None;
    assert_ok!(CarespaceClient::new(config))
}

fn session(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "Bearer",
            "expires_in": 3600,
            "user": user_json("u-1")
        }
    })
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "jane@clinic.test", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session("a-1", "r-1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let response = assert_ok!(
        client
            .auth()
            .login(&LoginRequest::new("jane@clinic.test", "pw"))
            .await
    );
    let login = assert_ok!(response.into_data());
    assert_eq!(login.access_token, "a-1");
    assert_eq!(login.expires_in, 3600);
    // Plain login does not touch stored credentials
    assert!(client.http().api_key().is_none());
}

#[tokio::test]
async fn test_login_rejects_blank_credentials() {
    let server = setup_mock_server().await;
    let client = anonymous_client(&server);

    let err = client
        .auth()
        .login(&LoginRequest::new(" ", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, CarespaceError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_login_and_set_token_then_refresh() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session("a-1", "r-1")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("authorization", "Bearer a-1"))
        .and(body_json(json!({"refresh_token": "r-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session("a-2", "r-2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .and(header("authorization", "Bearer a-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": user_json("u-1")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    assert_ok!(client.login_and_set_token("jane@clinic.test", "pw").await);
    assert!(!client.http().tokens().is_expired());

    let refreshed = assert_ok!(client.refresh_and_set_token().await);
    assert_eq!(refreshed.refresh_token, "r-2");
    assert_ok!(client.users().profile().await);
}

#[tokio::test]
async fn test_login_http_401_maps_to_authentication() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "bad password"})))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let err = client
        .login_and_set_token("jane@clinic.test", "nope")
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), "bad password");
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let server = setup_mock_server().await;
    let client = anonymous_client(&server);
    let err = client
        .auth()
        .refresh_token(&RefreshTokenRequest {
            refresh_token: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CarespaceError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_logout_without_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(2)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    assert_ok!(client.auth().logout(None).await);
    let request = LogoutRequest {
        refresh_token: Some("r-1".to_string()),
    };
    assert_ok!(client.auth().logout(Some(&request)).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests[0].body.is_empty());
    let body: serde_json::Value = assert_ok!(serde_json::from_slice(&requests[1].body));
    assert_eq!(body, json!({"refresh_token": "r-1"}));
}

#[tokio::test]
async fn test_password_flows() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_json(json!({"email": "jane@clinic.test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/reset-password"))
        .and(body_json(json!({"token": "t", "new_password": "n"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/change-password"))
        .and(body_json(json!({"current_password": "o", "new_password": "n"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let auth = client.auth();
    assert_ok!(
        auth.forgot_password(&ForgotPasswordRequest {
            email: "jane@clinic.test".to_string(),
        })
        .await
    );
    assert_ok!(
        auth.reset_password(&ResetPasswordRequest {
            token: "t".to_string(),
            new_password: "n".to_string(),
        })
        .await
    );
    assert_ok!(
        auth.change_password(&ChangePasswordRequest {
            current_password: "o".to_string(),
            new_password: "n".to_string(),
        })
        .await
    );
}

#[tokio::test]
async fn test_generate_token_and_register() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "xyz"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({"email": "new@clinic.test"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "u-5"})))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let token = assert_ok!(client.auth().generate_token().await);
    assert_eq!(token["token"], "xyz");
    let created = assert_ok!(
        client
            .auth()
            .register(&json!({"email": "new@clinic.test"}))
            .await
    );
    assert_eq!(created["id"], "u-5");
}

#[tokio::test]
async fn test_logout_accepts_no_content() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let response = assert_ok!(client.auth().logout(None).await);
    assert!(response.success);
}

#[tokio::test]
async fn test_browser_session_endpoints() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/auth/sign-in"))
        .and(body_json(json!({"email": "jane@clinic.test", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "s-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .and(body_json(json!({"refresh_token": "r-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "s-2"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/password-recovery"))
        .and(body_json(json!({"email": "jane@clinic.test"})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/sign-out"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let auth = client.auth();
    let signed_in = assert_ok!(
        auth.sign_in(&json!({"email": "jane@clinic.test", "password": "pw"}))
            .await
    );
    assert_eq!(signed_in["session"], "s-1");
    let refreshed = assert_ok!(auth.refresh_session(&json!({"refresh_token": "r-1"})).await);
    assert_eq!(refreshed["session"], "s-2");
    let recovery = assert_ok!(
        auth.password_recovery(&json!({"email": "jane@clinic.test"}))
            .await
    );
    assert!(recovery.is_null());
    assert!(assert_ok!(auth.sign_out().await).is_null());

    let requests = server.received_requests().await.unwrap_or_default();
    let sign_out = requests
        .iter()
        .find(|r| r.url.path() == "/auth/sign-out")
        .map(|r| r.body.is_empty());
    assert_eq!(sign_out, Some(true));
}

#[tokio::test]
async fn test_login_and_logout_redirect_endpoints_use_get() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": false})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"redirect": "/"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let status = assert_ok!(client.auth().login_status().await);
    assert_eq!(status["authenticated"], false);
    let redirect = assert_ok!(client.auth().logout_redirect().await);
    assert_eq!(redirect["redirect"], "/");
}
