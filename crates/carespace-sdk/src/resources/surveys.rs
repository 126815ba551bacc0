/*
[INPUT]:  Survey/session/template identifiers and survey payloads
[OUTPUT]: Surveys, survey results, survey templates
[POS]:    API layer - /survey endpoints (loosely typed JSON)
[UPDATE]: When survey endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

pub struct SurveysResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> SurveysResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        self.http.get(path, &QueryParams::new()).await
    }

    /// POST /survey
    pub async fn create<B: Serialize + ?Sized>(&self, survey: &B) -> Result<Value> {
        self.http.post("/survey", Some(survey)).await
    }

    /// GET /survey/{userId}
    pub async fn by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.fetch(&format!("/survey/{user_id}")).await
    }

    /// GET /survey/get/{surveyId}
    pub async fn get(&self, survey_id: &str) -> Result<Value> {
        let survey_id = require_id("surveyId", survey_id)?;
        self.fetch(&format!("/survey/get/{survey_id}")).await
    }

    /// PATCH /survey/{surveyId}
    pub async fn update<B: Serialize + ?Sized>(&self, survey_id: &str, survey: &B) -> Result<Value> {
        let survey_id = require_id("surveyId", survey_id)?;
        self.http
            .patch(&format!("/survey/{survey_id}"), Some(survey))
            .await
    }

    /// DELETE /survey/{surveyId}
    pub async fn delete(&self, survey_id: &str) -> Result<Value> {
        let survey_id = require_id("surveyId", survey_id)?;
        self.http.delete(&format!("/survey/{survey_id}")).await
    }

    /// POST /survey/session/{surveyId}
    pub async fn save_result<B: Serialize + ?Sized>(
        &self,
        survey_id: &str,
        result: &B,
    ) -> Result<Value> {
        let survey_id = require_id("surveyId", survey_id)?;
        self.http
            .post(&format!("/survey/session/{survey_id}"), Some(result))
            .await
    }

    /// GET /survey/session/{userId}
    pub async fn results_by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.fetch(&format!("/survey/session/{user_id}")).await
    }

    /// GET /survey/result/{surveyResultId}
    pub async fn result(&self, survey_result_id: &str) -> Result<Value> {
        let survey_result_id = require_id("surveyResultId", survey_result_id)?;
        self.fetch(&format!("/survey/result/{survey_result_id}"))
            .await
    }

    /// GET /survey/sessions/{surveyId}
    pub async fn results_by_survey(&self, survey_id: &str) -> Result<Value> {
        let survey_id = require_id("surveyId", survey_id)?;
        self.fetch(&format!("/survey/sessions/{survey_id}")).await
    }

    /// GET /survey/sessions/status/{status}/users
    pub async fn sessions_by_status(&self, status: &str) -> Result<Value> {
        let status = require_id("status", status)?;
        self.fetch(&format!("/survey/sessions/status/{status}/users"))
            .await
    }

    /// PATCH /survey/sessions/{sessionId}/status
    pub async fn update_session_status<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        status: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(&format!("/survey/sessions/{session_id}/status"), Some(status))
            .await
    }

    /// POST /survey/template
    pub async fn create_template<B: Serialize + ?Sized>(&self, template: &B) -> Result<Value> {
        self.http.post("/survey/template", Some(template)).await
    }

    /// GET /survey/template/list
    pub async fn templates(&self) -> Result<Value> {
        self.fetch("/survey/template/list").await
    }

    /// PATCH /survey/template/{surveyTemplateId}
    pub async fn update_template<B: Serialize + ?Sized>(
        &self,
        template_id: &str,
        template: &B,
    ) -> Result<Value> {
        let template_id = require_id("surveyTemplateId", template_id)?;
        self.http
            .patch(&format!("/survey/template/{template_id}"), Some(template))
            .await
    }
}
