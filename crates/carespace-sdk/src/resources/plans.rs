/*
[INPUT]:  User identifiers and plan payloads
[OUTPUT]: Care plans per user
[POS]:    API layer - /plans endpoints (loosely typed JSON)
[UPDATE]: When plan endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

pub struct PlansResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> PlansResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// GET /plans/users
    pub async fn all(&self) -> Result<Value> {
        self.http.get("/plans/users", &QueryParams::new()).await
    }

    /// GET /plans/users/{userId}
    pub async fn for_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .get(&format!("/plans/users/{user_id}"), &QueryParams::new())
            .await
    }

    /// POST /plans/users/{userId}
    pub async fn create<B: Serialize + ?Sized>(&self, user_id: &str, plan: &B) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .post(&format!("/plans/users/{user_id}"), Some(plan))
            .await
    }

    /// PATCH /plans/users/{userId}
    pub async fn update<B: Serialize + ?Sized>(&self, user_id: &str, plan: &B) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .patch(&format!("/plans/users/{user_id}"), Some(plan))
            .await
    }
}
