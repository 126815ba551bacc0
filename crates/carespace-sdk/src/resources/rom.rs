/*
[INPUT]:  Patient/session/program identifiers and ROM payloads
[OUTPUT]: Range-of-motion sessions, results, library entries, programs, templates
[POS]:    API layer - /rom endpoints (loosely typed JSON)
[UPDATE]: When ROM endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

/// Range-of-motion assessments.
pub struct RomResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> RomResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    async fn fetch(&self, path: &str) -> Result<Value> {
        self.http.get(path, &QueryParams::new()).await
    }

    // ==================== Sessions ====================

    /// GET /rom/patients/{patientId}/results
    pub async fn patient_results(&self, patient_id: &str) -> Result<Value> {
        let patient_id = require_id("patientId", patient_id)?;
        self.fetch(&format!("/rom/patients/{patient_id}/results"))
            .await
    }

    /// GET /rom/patients/{patientId}/results/sessions
    pub async fn patient_results_by_session(&self, patient_id: &str) -> Result<Value> {
        let patient_id = require_id("patientId", patient_id)?;
        self.fetch(&format!("/rom/patients/{patient_id}/results/sessions"))
            .await
    }

    /// GET /rom/sessions/{userId}/all
    pub async fn sessions_by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.fetch(&format!("/rom/sessions/{user_id}/all")).await
    }

    /// GET /rom/sessions/{userId}
    pub async fn last_session(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.fetch(&format!("/rom/sessions/{user_id}")).await
    }

    /// GET /rom/sessions/status/{status}/users
    pub async fn sessions_by_status(&self, status: &str) -> Result<Value> {
        let status = require_id("status", status)?;
        self.fetch(&format!("/rom/sessions/status/{status}/users"))
            .await
    }

    /// GET /rom/session/{sessionId}
    pub async fn session(&self, session_id: &str) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.fetch(&format!("/rom/session/{session_id}")).await
    }

    /// GET /rom/sessions/programs/{programId}
    pub async fn sessions_by_program(&self, program_id: &str) -> Result<Value> {
        let program_id = require_id("programId", program_id)?;
        self.fetch(&format!("/rom/sessions/programs/{program_id}"))
            .await
    }

    /// POST /rom/sessions
    pub async fn create_session<B: Serialize + ?Sized>(&self, session: &B) -> Result<Value> {
        self.http.post("/rom/sessions", Some(session)).await
    }

    /// PATCH /rom/sessions/{sessionId}
    pub async fn update_session<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        session: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(&format!("/rom/sessions/{session_id}"), Some(session))
            .await
    }

    /// PATCH /rom/sessions/{sessionId}/complete
    pub async fn complete_session<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        completion: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(&format!("/rom/sessions/{session_id}/complete"), Some(completion))
            .await
    }

    /// PATCH /rom/sessions/{sessionId}/status
    pub async fn update_session_status<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        status: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .patch(&format!("/rom/sessions/{session_id}/status"), Some(status))
            .await
    }

    /// POST /rom/sessions/{sessionId}/pdf
    pub async fn session_pdf<B: Serialize + ?Sized>(
        &self,
        session_id: &str,
        options: &B,
    ) -> Result<Value> {
        let session_id = require_id("sessionId", session_id)?;
        self.http
            .post(&format!("/rom/sessions/{session_id}/pdf"), Some(options))
            .await
    }

    /// POST /rom/sessions/patient-results
    pub async fn save_patient_results<B: Serialize + ?Sized>(&self, results: &B) -> Result<Value> {
        self.http
            .post("/rom/sessions/patient-results", Some(results))
            .await
    }

    /// PATCH /rom/sessions/patient-results/{resultId}
    pub async fn update_patient_results<B: Serialize + ?Sized>(
        &self,
        result_id: &str,
        results: &B,
    ) -> Result<Value> {
        let result_id = require_id("resultId", result_id)?;
        self.http
            .patch(
                &format!("/rom/sessions/patient-results/{result_id}"),
                Some(results),
            )
            .await
    }

    /// GET /rom/mobility-score/{userId}
    pub async fn mobility_scores(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.fetch(&format!("/rom/mobility-score/{user_id}")).await
    }

    // ==================== Library ====================

    /// GET /rom/library
    pub async fn library(&self) -> Result<Value> {
        self.fetch("/rom/library").await
    }

    /// POST /rom/library
    pub async fn create_library<B: Serialize + ?Sized>(&self, entry: &B) -> Result<Value> {
        self.http.post("/rom/library", Some(entry)).await
    }

    /// GET /rom/library/{libraryId}
    pub async fn library_entry(&self, library_id: &str) -> Result<Value> {
        let library_id = require_id("libraryId", library_id)?;
        self.fetch(&format!("/rom/library/{library_id}")).await
    }

    /// PATCH /rom/library/{libraryId}
    pub async fn update_library<B: Serialize + ?Sized>(
        &self,
        library_id: &str,
        entry: &B,
    ) -> Result<Value> {
        let library_id = require_id("libraryId", library_id)?;
        self.http
            .patch(&format!("/rom/library/{library_id}"), Some(entry))
            .await
    }

    /// DELETE /rom/library/{libraryId}
    pub async fn delete_library(&self, library_id: &str) -> Result<Value> {
        let library_id = require_id("libraryId", library_id)?;
        self.http
            .delete(&format!("/rom/library/{library_id}"))
            .await
    }

    // ==================== Programs ====================

    /// GET /rom/programs (programs owned by the current user)
    pub async fn programs(&self) -> Result<Value> {
        self.fetch("/rom/programs").await
    }

    /// POST /rom/programs
    pub async fn create_program<B: Serialize + ?Sized>(&self, program: &B) -> Result<Value> {
        self.http.post("/rom/programs", Some(program)).await
    }

    /// GET /rom/programs/patients/{patientId}
    pub async fn programs_by_patient(&self, patient_id: &str) -> Result<Value> {
        let patient_id = require_id("patientId", patient_id)?;
        self.fetch(&format!("/rom/programs/patients/{patient_id}"))
            .await
    }

    /// GET /rom/programs/{programId}
    pub async fn program(&self, program_id: &str) -> Result<Value> {
        let program_id = require_id("programId", program_id)?;
        self.fetch(&format!("/rom/programs/{program_id}")).await
    }

    /// PATCH /rom/programs/{programId}
    pub async fn update_program<B: Serialize + ?Sized>(
        &self,
        program_id: &str,
        program: &B,
    ) -> Result<Value> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .patch(&format!("/rom/programs/{program_id}"), Some(program))
            .await
    }

    /// DELETE /rom/programs/{programId}
    pub async fn delete_program(&self, program_id: &str) -> Result<Value> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .delete(&format!("/rom/programs/{program_id}"))
            .await
    }

    // ==================== Program templates ====================

    /// GET /rom/program-templates
    pub async fn templates(&self) -> Result<Value> {
        self.fetch("/rom/program-templates").await
    }

    /// POST /rom/program-templates
    pub async fn create_template<B: Serialize + ?Sized>(&self, template: &B) -> Result<Value> {
        self.http.post("/rom/program-templates", Some(template)).await
    }

    /// GET /rom/program-templates/{programTemplateId}
    pub async fn template(&self, template_id: &str) -> Result<Value> {
        let template_id = require_id("programTemplateId", template_id)?;
        self.fetch(&format!("/rom/program-templates/{template_id}"))
            .await
    }

    /// PATCH /rom/program-templates/{programTemplateId}
    pub async fn update_template<B: Serialize + ?Sized>(
        &self,
        template_id: &str,
        template: &B,
    ) -> Result<Value> {
        let template_id = require_id("programTemplateId", template_id)?;
        self.http
            .patch(
                &format!("/rom/program-templates/{template_id}"),
                Some(template),
            )
            .await
    }

    /// DELETE /rom/program-templates/{programTemplateId}
    pub async fn delete_template(&self, template_id: &str) -> Result<Value> {
        let template_id = require_id("programTemplateId", template_id)?;
        self.http
            .delete(&format!("/rom/program-templates/{template_id}"))
            .await
    }
}
