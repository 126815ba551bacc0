/*
[INPUT]:  CarespaceConfig or an API key plus optional base URL
[OUTPUT]: Entry point exposing every resource group over one shared transport
[POS]:    Client layer - facade over CarespaceHttpClient and resources
[UPDATE]: When resource groups or convenience helpers change
*/

use tracing::{info, warn};

use crate::config::CarespaceConfig;
use crate::http::{CarespaceError, CarespaceHttpClient, QueryParams, Result};
use crate::resources::{
    ActivityStreamResource, AuthResource, ClientsResource, EvaluationsResource, PlansResource,
    PostureResource, ProgramsResource, ReportsResource, RomResource, SettingsResource,
    StatsResource, SurveysResource, UsersResource, VrResource,
};
use crate::types::{
    ApiResponse, Client, ListClientsParams, ListProgramsParams, ListUsersParams, LoginRequest, LoginResponse,
    PaginatedResponse, Program, ProgramCategory, RefreshTokenRequest, User,
};

/// Carespace API client.
///
/// Resource accessors borrow the shared transport, so they are free to call
/// per request:
///
/// ```no_run
/// # async fn run() -> carespace_sdk::Result<()> {
/// let client = carespace_sdk::CarespaceClient::production("my-api-key")?;
/// let page = client.users().list(&Default::default()).await?;
/// println!("{} users", page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CarespaceClient {
    http: CarespaceHttpClient,
    config: CarespaceConfig,
}

impl CarespaceClient {
    pub fn new(config: CarespaceConfig) -> Result<Self> {
        let http = CarespaceHttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    /// Default configuration with `api_key`, optionally pointed at `base_url`.
    pub fn with_api_key(api_key: impl Into<String>, base_url: Option<&str>) -> Result<Self> {
        let mut config = CarespaceConfig::default().with_api_key(api_key);
        if let Some(base_url) = base_url {
            config = config.with_base_url(base_url);
        }
        Self::new(config)
    }

    pub fn development(api_key: Option<String>) -> Result<Self> {
        Self::new(CarespaceConfig::development(api_key))
    }

    pub fn staging(api_key: impl Into<String>) -> Result<Self> {
        Self::new(CarespaceConfig::staging(api_key))
    }

    pub fn production(api_key: impl Into<String>) -> Result<Self> {
        Self::new(CarespaceConfig::production(api_key))
    }

    /// Configuration the client was built from.
    ///
    /// Later credential changes (`set_api_key`, `login_and_set_token`) are not
    /// written back here; read the live key from `http().api_key()`.
    pub fn config(&self) -> &CarespaceConfig {
        &self.config
    }

    pub fn http(&self) -> &CarespaceHttpClient {
        &self.http
    }

    // --- Credentials ---

    pub fn set_api_key(&self, api_key: &str) {
        self.http.set_api_key(api_key);
    }

    pub fn set_default_header(&self, name: &str, value: &str) -> Result<()> {
        self.http.set_default_header(name, value)
    }

    pub fn remove_default_header(&self, name: &str) {
        self.http.remove_default_header(name);
    }

    // --- Resources ---

    pub fn auth(&self) -> AuthResource<'_> {
        AuthResource::new(&self.http)
    }

    pub fn users(&self) -> UsersResource<'_> {
        UsersResource::new(&self.http)
    }

    pub fn clients(&self) -> ClientsResource<'_> {
        ClientsResource::new(&self.http)
    }

    pub fn programs(&self) -> ProgramsResource<'_> {
        ProgramsResource::new(&self.http)
    }

    pub fn rom(&self) -> RomResource<'_> {
        RomResource::new(&self.http)
    }

    pub fn surveys(&self) -> SurveysResource<'_> {
        SurveysResource::new(&self.http)
    }

    pub fn posture(&self) -> PostureResource<'_> {
        PostureResource::new(&self.http)
    }

    pub fn reports(&self) -> ReportsResource<'_> {
        ReportsResource::new(&self.http)
    }

    pub fn settings(&self) -> SettingsResource<'_> {
        SettingsResource::new(&self.http)
    }

    pub fn evaluations(&self) -> EvaluationsResource<'_> {
        EvaluationsResource::new(&self.http)
    }

    pub fn plans(&self) -> PlansResource<'_> {
        PlansResource::new(&self.http)
    }

    pub fn activity_stream(&self) -> ActivityStreamResource<'_> {
        ActivityStreamResource::new(&self.http)
    }

    pub fn stats(&self) -> StatsResource<'_> {
        StatsResource::new(&self.http)
    }

    pub fn vr(&self) -> VrResource<'_> {
        VrResource::new(&self.http)
    }

    // --- Session helpers ---

    /// Log in and authenticate subsequent calls with the returned access token.
    pub async fn login_and_set_token(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .auth()
            .login(&LoginRequest::new(email, password))
            .await?;
        let login = session_from(response)?;
        self.http.tokens().set_session(&login);
        info!(user_id = %login.user.id, "logged in");
        Ok(login)
    }

    /// Exchange the stored refresh token for a new session.
    pub async fn refresh_and_set_token(&self) -> Result<LoginResponse> {
        let refresh_token = self.http.tokens().refresh_token().ok_or_else(|| {
            CarespaceError::InvalidArgument("no refresh token stored".to_string())
        })?;
        let response = self
            .auth()
            .refresh_token(&RefreshTokenRequest { refresh_token })
            .await?;
        let login = session_from(response)?;
        self.http.tokens().set_session(&login);
        Ok(login)
    }

    // --- Quick helpers ---

    pub async fn quick_users(
        &self,
        limit: u32,
        search: Option<&str>,
    ) -> Result<PaginatedResponse<User>> {
        let params = ListUsersParams {
            limit,
            search: search.map(str::to_string),
            ..ListUsersParams::default()
        };
        self.users().list(&params).await
    }

    pub async fn quick_clients(
        &self,
        limit: u32,
        search: Option<&str>,
    ) -> Result<PaginatedResponse<Client>> {
        let params = ListClientsParams {
            limit,
            search: search.map(str::to_string),
            ..ListClientsParams::default()
        };
        self.clients().list(&params).await
    }

    pub async fn quick_programs(
        &self,
        limit: u32,
        category: Option<ProgramCategory>,
    ) -> Result<PaginatedResponse<Program>> {
        let params = ListProgramsParams {
            limit,
            category,
            ..ListProgramsParams::default()
        };
        self.programs().list(&params).await
    }

    /// `true` when the API answers an authenticated (or public) request.
    pub async fn health_check(&self) -> bool {
        let outcome = if self.http.api_key().is_some() {
            self.http
                .get::<serde_json::Value>("/users/profile", &QueryParams::new())
                .await
        } else {
            let mut query = QueryParams::new();
            query.push("page", 1).push("limit", 1);
            self.http.get::<serde_json::Value>("/users", &query).await
        };

        match outcome {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "health check failed");
                false
            }
        }
    }
}

fn session_from(response: ApiResponse<LoginResponse>) -> Result<LoginResponse> {
    if !response.success {
        return Err(CarespaceError::Unsuccessful {
            message: format!("Login failed: {}", response.failure_message()),
        });
    }
    response.data.ok_or_else(|| CarespaceError::Unsuccessful {
        message: "Login failed: response contained no session".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer, api_key: Option<&str>) -> CarespaceClient {
        let mut config = CarespaceConfig::default()
            .with_base_url(server.uri())
            .with_retry(1, Duration::ZERO);
        config.api_key = api_key.map(str::to_string);
        CarespaceClient::new(config).unwrap()
    }

    fn login_body(success: bool) -> serde_json::Value {
        if success {
            json!({
                "success": true,
                "data": {
                    "access_token": "session-token",
                    "refresh_token": "refresh-1",
                    "expires_in": 3600,
                    "user": {"id": "u-1", "email": "jane@clinic.test", "role": "provider"}
                }
            })
        } else {
            json!({"success": false, "error": "Invalid credentials"})
        }
    }

    #[test]
    fn test_presets_select_environment() {
        let client = CarespaceClient::production("key").unwrap();
        assert_eq!(client.config().base_url, crate::config::PRODUCTION_BASE_URL);
        assert_eq!(client.http().api_key().as_deref(), Some("key"));

        let client = CarespaceClient::development(None).unwrap();
        assert!(client.http().api_key().is_none());
    }

    #[test]
    fn test_with_api_key_overrides_base_url() {
        let client = CarespaceClient::with_api_key("key", Some("http://localhost:9000/api")).unwrap();
        assert_eq!(client.http().base_url().as_str(), "http://localhost:9000/api");

        let client = CarespaceClient::with_api_key("key", None).unwrap();
        assert_eq!(client.config().base_url, CarespaceConfig::default().base_url);
    }

    #[tokio::test]
    async fn test_login_and_set_token_authenticates_later_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_body(true)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .and(header("authorization", "Bearer session-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1})))
            .mount(&server)
            .await;

        let client = test_client(&server, None);
        let login = client
            .login_and_set_token("jane@clinic.test", "secret")
            .await
            .unwrap();
        assert_eq!(login.user.id, "u-1");
        assert_eq!(client.http().tokens().refresh_token().as_deref(), Some("refresh-1"));

        let stats = client.stats().get().await.unwrap();
        assert_eq!(stats["total"], 1);
    }

    #[tokio::test]
    async fn test_login_failure_reports_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_body(false)))
            .mount(&server)
            .await;

        let client = test_client(&server, None);
        let err = client
            .login_and_set_token("jane@clinic.test", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed: Invalid credentials");
        assert!(client.http().api_key().is_none());
    }

    #[tokio::test]
    async fn test_refresh_without_stored_token() {
        let server = MockServer::start().await;
        let client = test_client(&server, Some("key"));
        let err = client.refresh_and_set_token().await.unwrap_err();
        assert!(matches!(err, CarespaceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_health_check_with_api_key_uses_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(test_client(&server, Some("key")).health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_without_api_key_lists_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(test_client(&server, None).health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_false_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/profile"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad key"})))
            .mount(&server)
            .await;

        assert!(!test_client(&server, Some("key")).health_check().await);
    }
}
