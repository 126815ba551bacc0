/*
[INPUT]:  Program/exercise identifiers, filters, create/update payloads
[OUTPUT]: Programs, exercises, duplicated and template-derived programs
[POS]:    API layer - /programs endpoints
[UPDATE]: When program endpoints or filters change
*/

use crate::http::query::wire_value;
use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::{page_query, require_id};
use crate::types::{
    ApiResponse, CreateExerciseRequest, CreateProgramRequest, Exercise, ListProgramsParams,
    PageParams, PaginatedResponse, Program, ProgramNameRequest, UpdateProgramRequest,
};

/// Exercise programs and their exercises.
pub struct ProgramsResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> ProgramsResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// GET /programs?page={page}&limit={limit}[&search][&category][&difficulty][&is_template][&is_public][&creator_id]
    pub async fn list(&self, params: &ListProgramsParams) -> Result<PaginatedResponse<Program>> {
        let mut query = QueryParams::new();
        query
            .push("page", params.page)
            .push("limit", params.limit)
            .push_opt("search", params.search.as_deref());
        if let Some(category) = &params.category {
            query.push("category", wire_value(category)?);
        }
        if let Some(difficulty) = &params.difficulty {
            query.push("difficulty", wire_value(difficulty)?);
        }
        query
            .push_opt("is_template", params.is_template)
            .push_opt("is_public", params.is_public)
            .push_opt("creator_id", params.creator_id.as_deref());
        self.http.get("/programs", &query).await
    }

    /// GET /programs/{programId}
    pub async fn get(&self, program_id: &str) -> Result<ApiResponse<Program>> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .get(&format!("/programs/{program_id}"), &QueryParams::new())
            .await
    }

    /// POST /programs
    pub async fn create(&self, request: &CreateProgramRequest) -> Result<ApiResponse<Program>> {
        self.http.post("/programs", Some(request)).await
    }

    /// PUT /programs/{programId}
    pub async fn update(
        &self,
        program_id: &str,
        request: &UpdateProgramRequest,
    ) -> Result<ApiResponse<Program>> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .put(&format!("/programs/{program_id}"), Some(request))
            .await
    }

    /// DELETE /programs/{programId}
    pub async fn delete(&self, program_id: &str) -> Result<()> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .delete_empty(&format!("/programs/{program_id}"))
            .await
    }

    /// GET /programs/{programId}/exercises?page={page}&limit={limit}
    pub async fn exercises(
        &self,
        program_id: &str,
        page: &PageParams,
    ) -> Result<PaginatedResponse<Exercise>> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .get(&format!("/programs/{program_id}/exercises"), &page_query(page))
            .await
    }

    /// POST /programs/{programId}/exercises
    pub async fn add_exercise(
        &self,
        program_id: &str,
        request: &CreateExerciseRequest,
    ) -> Result<ApiResponse<Exercise>> {
        let program_id = require_id("programId", program_id)?;
        self.http
            .post(&format!("/programs/{program_id}/exercises"), Some(request))
            .await
    }

    /// PUT /programs/{programId}/exercises/{exerciseId}
    pub async fn update_exercise(
        &self,
        program_id: &str,
        exercise_id: &str,
        request: &CreateExerciseRequest,
    ) -> Result<ApiResponse<Exercise>> {
        let program_id = require_id("programId", program_id)?;
        let exercise_id = require_id("exerciseId", exercise_id)?;
        self.http
            .put(
                &format!("/programs/{program_id}/exercises/{exercise_id}"),
                Some(request),
            )
            .await
    }

    /// DELETE /programs/{programId}/exercises/{exerciseId}
    pub async fn remove_exercise(&self, program_id: &str, exercise_id: &str) -> Result<()> {
        let program_id = require_id("programId", program_id)?;
        let exercise_id = require_id("exerciseId", exercise_id)?;
        self.http
            .delete_empty(&format!("/programs/{program_id}/exercises/{exercise_id}"))
            .await
    }

    /// POST /programs/{programId}/duplicate
    ///
    /// The body carries `name` only when one is given.
    pub async fn duplicate(
        &self,
        program_id: &str,
        name: Option<&str>,
    ) -> Result<ApiResponse<Program>> {
        let program_id = require_id("programId", program_id)?;
        let request = name.map(|name| ProgramNameRequest {
            name: name.to_string(),
        });
        self.http
            .post(&format!("/programs/{program_id}/duplicate"), request.as_ref())
            .await
    }

    /// POST /programs/from-template/{templateId}
    pub async fn from_template(
        &self,
        template_id: &str,
        name: Option<&str>,
    ) -> Result<ApiResponse<Program>> {
        let template_id = require_id("templateId", template_id)?;
        let request = name.map(|name| ProgramNameRequest {
            name: name.to_string(),
        });
        self.http
            .post(
                &format!("/programs/from-template/{template_id}"),
                request.as_ref(),
            )
            .await
    }
}
