/*
[INPUT]:  Posture session/user identifiers and analytics payloads
[OUTPUT]: Posture sessions, analytics, reports
[POS]:    API layer - /posture-analytics endpoints (loosely typed JSON)
[UPDATE]: When posture endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

/// Posture analytics sessions and reports.
pub struct PostureResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> PostureResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// POST /posture-analytics/sessions
    pub async fn create_session<B: Serialize + ?Sized>(&self, session: &B) -> Result<Value> {
        self.http
            .post("/posture-analytics/sessions", Some(session))
            .await
    }

    /// GET /posture-analytics/sessions/users/{userId}
    pub async fn sessions_by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .get(
                &format!("/posture-analytics/sessions/users/{user_id}"),
                &QueryParams::new(),
            )
            .await
    }

    /// DELETE /posture-analytics/sessions/{id}
    pub async fn delete_session(&self, session_id: &str) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .delete(&format!("/posture-analytics/sessions/{session_id}"))
            .await
    }

    /// PATCH /posture-analytics/sessions/{sessionId}/status
    pub async fn update_session_status<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        status: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(
                &format!("/posture-analytics/sessions/{session_id}/status"),
                Some(status),
            )
            .await
    }

    /// POST /posture-analytics
    pub async fn create_analytics<B: Serialize + ?Sized>(&self, analytics: &B) -> Result<Value> {
        self.http.post("/posture-analytics", Some(analytics)).await
    }

    /// GET /posture-analytics/{id}
    pub async fn analytics(&self, analytics_id: &str) -> Result<Value> {
        let analytics_id = require_id("analyticsId", analytics_id)?;
        self.http
            .get(
                &format!("/posture-analytics/{analytics_id}"),
                &QueryParams::new(),
            )
            .await
    }

    /// POST /posture-analytics/report
    pub async fn create_report<B: Serialize + ?Sized>(&self, report: &B) -> Result<Value> {
        self.http
            .post("/posture-analytics/report", Some(report))
            .await
    }

    /// GET /posture-analytics/users/{userId}/report
    pub async fn report_by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .get(
                &format!("/posture-analytics/users/{user_id}/report"),
                &QueryParams::new(),
            )
            .await
    }

    /// GET /posture-analytics/sessions/{sessionId}/report
    pub async fn report_by_session(&self, session_id: &str) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .get(
                &format!("/posture-analytics/sessions/{session_id}/report"),
                &QueryParams::new(),
            )
            .await
    }
}
