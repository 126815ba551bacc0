/*
[INPUT]:  Credentials, refresh tokens, password reset payloads
[OUTPUT]: Login sessions and acknowledgement envelopes
[POS]:    API layer - /auth endpoints
[UPDATE]: When auth endpoints or payloads change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceError, CarespaceHttpClient, QueryParams, Result};
use crate::types::{
    ApiResponse, ChangePasswordRequest, EmptyData, ForgotPasswordRequest, LoginRequest,
    LoginResponse, LogoutRequest, RefreshTokenRequest, ResetPasswordRequest,
};

/// Authentication and password management.
pub struct AuthResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> AuthResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<LoginResponse>> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(CarespaceError::InvalidArgument(
                "email and password are required".to_string(),
            ));
        }
        self.http.post("/auth/login", Some(request)).await
    }

    /// POST /auth/refresh
    pub async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<ApiResponse<LoginResponse>> {
        if request.refresh_token.trim().is_empty() {
            return Err(CarespaceError::InvalidArgument(
                "refresh token is required".to_string(),
            ));
        }
        self.http.post("/auth/refresh", Some(request)).await
    }

    /// POST /auth/logout
    pub async fn logout(&self, request: Option<&LogoutRequest>) -> Result<EmptyData> {
        self.http.post("/auth/logout", request).await
    }

    /// POST /auth/forgot-password
    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<EmptyData> {
        self.http.post("/auth/forgot-password", Some(request)).await
    }

    /// POST /auth/reset-password
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<EmptyData> {
        self.http.post("/auth/reset-password", Some(request)).await
    }

    /// POST /auth/change-password
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<EmptyData> {
        self.http.post("/auth/change-password", Some(request)).await
    }

    /// POST /auth/register
    pub async fn register<B: Serialize + ?Sized>(&self, user: &B) -> Result<Value> {
        self.http.post("/auth/register", Some(user)).await
    }

    /// POST /auth/token
    pub async fn generate_token(&self) -> Result<Value> {
        self.http.post_empty("/auth/token").await
    }

    // Session endpoints used by the browser flow. Payloads and replies are
    // passed through untyped.

    /// POST /auth/sign-in
    pub async fn sign_in<B: Serialize + ?Sized>(&self, credentials: &B) -> Result<Value> {
        self.http.post("/auth/sign-in", Some(credentials)).await
    }

    /// POST /auth/sign-out
    pub async fn sign_out(&self) -> Result<Value> {
        self.http.post_empty("/auth/sign-out").await
    }

    /// POST /auth/refresh-token
    pub async fn refresh_session<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
        self.http.post("/auth/refresh-token", Some(body)).await
    }

    /// POST /auth/password-recovery
    pub async fn password_recovery<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
        self.http.post("/auth/password-recovery", Some(body)).await
    }

    /// GET /auth/login
    pub async fn login_status(&self) -> Result<Value> {
        self.http.get("/auth/login", &QueryParams::new()).await
    }

    /// GET /auth/logout
    pub async fn logout_redirect(&self) -> Result<Value> {
        self.http.get("/auth/logout", &QueryParams::new()).await
    }
}
