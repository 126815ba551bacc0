/*
[INPUT]:  User identifiers, filters, create/update payloads
[OUTPUT]: User records and paginated user lists
[POS]:    API layer - /users endpoints
[UPDATE]: When user endpoints or filters change
*/

use crate::http::query::wire_value;
use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;
use crate::types::{
    ApiResponse, CreateUserRequest, EmptyData, ListUsersParams, PaginatedResponse,
    UpdateUserRequest, User,
};

/// User accounts (admins, providers, patients).
pub struct UsersResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> UsersResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// GET /users?page={page}&limit={limit}[&search][&role][&is_active]
    pub async fn list(&self, params: &ListUsersParams) -> Result<PaginatedResponse<User>> {
        let mut query = QueryParams::new();
        query
            .push("page", params.page)
            .push("limit", params.limit)
            .push_opt("search", params.search.as_deref());
        if let Some(role) = &params.role {
            query.push("role", wire_value(role)?);
        }
        query.push_opt("is_active", params.is_active);
        self.http.get("/users", &query).await
    }

    /// GET /users/{userId}
    pub async fn get(&self, user_id: &str) -> Result<ApiResponse<User>> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .get(&format!("/users/{user_id}"), &QueryParams::new())
            .await
    }

    /// GET /users/profile
    pub async fn profile(&self) -> Result<ApiResponse<User>> {
        self.http.get("/users/profile", &QueryParams::new()).await
    }

    /// POST /users
    pub async fn create(&self, request: &CreateUserRequest) -> Result<ApiResponse<User>> {
        self.http.post("/users", Some(request)).await
    }

    /// PUT /users/{userId}
    pub async fn update(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> Result<ApiResponse<User>> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .put(&format!("/users/{user_id}"), Some(request))
            .await
    }

    /// PUT /users/profile
    pub async fn update_profile(&self, request: &UpdateUserRequest) -> Result<ApiResponse<User>> {
        self.http.put("/users/profile", Some(request)).await
    }

    /// DELETE /users/{userId}
    pub async fn delete(&self, user_id: &str) -> Result<()> {
        let user_id = require_id("userId", user_id)?;
        self.http.delete_empty(&format!("/users/{user_id}")).await
    }

    /// POST /users/{userId}/deactivate
    pub async fn deactivate(&self, user_id: &str) -> Result<EmptyData> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .post_empty(&format!("/users/{user_id}/deactivate"))
            .await
    }

    /// POST /users/{userId}/activate
    pub async fn activate(&self, user_id: &str) -> Result<EmptyData> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .post_empty(&format!("/users/{user_id}/activate"))
            .await
    }
}
