/*
[INPUT]:  Activity identifiers and evaluation/feedback/post payloads
[OUTPUT]: Activity stream history and entries
[POS]:    API layer - /activity-stream endpoints (loosely typed JSON)
[UPDATE]: When activity stream endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

/// Patient activity feed: history, evaluations, feedback, posts.
pub struct ActivityStreamResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> ActivityStreamResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        self.http.get(path, &QueryParams::new()).await
    }

    /// GET /activity-stream/history/unread
    pub async fn unread_history(&self) -> Result<Value> {
        self.fetch("/activity-stream/history/unread").await
    }

    /// GET /activity-stream/history/{userId}
    pub async fn history(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.fetch(&format!("/activity-stream/history/{user_id}"))
            .await
    }

    /// PATCH /activity-stream/history/read/{userId}
    pub async fn mark_history_read<B: Serialize + ?Sized>(
        &self,
        user_id: &str,
        body: &B,
    ) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .patch(&format!("/activity-stream/history/read/{user_id}"), Some(body))
            .await
    }

    /// GET /activity-stream/{id}
    pub async fn get(&self, id: &str) -> Result<Value> {
        let id = require_id("id", id)?;
        self.fetch(&format!("/activity-stream/{id}")).await
    }

    /// POST /activity-stream/evaluation
    pub async fn create_evaluation<B: Serialize + ?Sized>(&self, evaluation: &B) -> Result<Value> {
        self.http
            .post("/activity-stream/evaluation", Some(evaluation))
            .await
    }

    /// GET /activity-stream/evaluation/{id}
    pub async fn evaluation(&self, id: &str) -> Result<Value> {
        let id = require_id("id", id)?;
        self.fetch(&format!("/activity-stream/evaluation/{id}"))
            .await
    }

    /// POST /activity-stream/feedback
    pub async fn create_feedback<B: Serialize + ?Sized>(&self, feedback: &B) -> Result<Value> {
        self.http
            .post("/activity-stream/feedback", Some(feedback))
            .await
    }

    /// GET /activity-stream/feedback/{id}
    pub async fn feedback(&self, id: &str) -> Result<Value> {
        let id = require_id("id", id)?;
        self.fetch(&format!("/activity-stream/feedback/{id}")).await
    }

    /// POST /activity-stream/post
    pub async fn create_post<B: Serialize + ?Sized>(&self, post: &B) -> Result<Value> {
        self.http.post("/activity-stream/post", Some(post)).await
    }

    /// GET /activity-stream/post/{id}
    pub async fn post(&self, id: &str) -> Result<Value> {
        let id = require_id("id", id)?;
        self.fetch(&format!("/activity-stream/post/{id}")).await
    }
}
