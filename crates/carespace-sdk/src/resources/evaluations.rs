/*
[INPUT]:  Evaluation session/user identifiers and evaluation payloads
[OUTPUT]: Evaluation sessions and results
[POS]:    API layer - /evaluation endpoints (loosely typed JSON)
[UPDATE]: When evaluation endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

pub struct EvaluationsResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> EvaluationsResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// POST /evaluation
    pub async fn create<B: Serialize + ?Sized>(&self, evaluation: &B) -> Result<Value> {
        self.http.post("/evaluation", Some(evaluation)).await
    }

    /// PATCH /evaluation/{sessionId}
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        session: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(&format!("/evaluation/{session_id}"), Some(session))
            .await
    }

    /// GET /evaluation/{userId}
    pub async fn by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .get(&format!("/evaluation/{user_id}"), &QueryParams::new())
            .await
    }

    /// GET /evaluation/sessions/{evaluationId}
    pub async fn get(&self, evaluation_id: &str) -> Result<Value> {
        let evaluation_id = require_id("evaluationId", evaluation_id)?;
        self.http
            .get(
                &format!("/evaluation/sessions/{evaluation_id}"),
                &QueryParams::new(),
            )
            .await
    }

    /// GET /evaluation/sessions/status/{status}/users
    pub async fn results_by_status(&self, status: &str) -> Result<Value> {
        let status = require_id("status", status)?;
        self.http
            .get(
                &format!("/evaluation/sessions/status/{status}/users"),
                &QueryParams::new(),
            )
            .await
    }

    /// PATCH /evaluation/sessions/{sessionId}/status
    pub async fn update_status<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        status: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(
                &format!("/evaluation/sessions/{session_id}/status"),
                Some(status),
            )
            .await
    }
}
