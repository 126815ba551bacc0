/*
[INPUT]:  Client identifiers, filters, create/update payloads, program assignments
[OUTPUT]: Client records, stats, assigned programs
[POS]:    API layer - /clients endpoints
[UPDATE]: When client endpoints or filters change
*/

use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::{page_query, require_id};
use crate::types::{
    ApiResponse, AssignProgramRequest, Client, ClientStats, CreateClientRequest, EmptyData,
    ListClientsParams, PageParams, PaginatedResponse, Program, UpdateClientRequest,
};

/// Patients ("clients") managed by providers.
pub struct ClientsResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> ClientsResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// GET /clients?page={page}&limit={limit}[&search][&provider_id][&is_active]
    pub async fn list(&self, params: &ListClientsParams) -> Result<PaginatedResponse<Client>> {
        let mut query = QueryParams::new();
        query
            .push("page", params.page)
            .push("limit", params.limit)
            .push_opt("search", params.search.as_deref())
            .push_opt("provider_id", params.provider_id.as_deref())
            .push_opt("is_active", params.is_active);
        self.http.get("/clients", &query).await
    }

    /// GET /clients/{clientId}
    pub async fn get(&self, client_id: &str) -> Result<ApiResponse<Client>> {
        let client_id = require_id("clientId", client_id)?;
        self.http
            .get(&format!("/clients/{client_id}"), &QueryParams::new())
            .await
    }

    /// POST /clients
    pub async fn create(&self, request: &CreateClientRequest) -> Result<ApiResponse<Client>> {
        self.http.post("/clients", Some(request)).await
    }

    /// PUT /clients/{clientId}
    pub async fn update(
        &self,
        client_id: &str,
        request: &UpdateClientRequest,
    ) -> Result<ApiResponse<Client>> {
        let client_id = require_id("clientId", client_id)?;
        self.http
            .put(&format!("/clients/{client_id}"), Some(request))
            .await
    }

    /// DELETE /clients/{clientId}
    pub async fn delete(&self, client_id: &str) -> Result<()> {
        let client_id = require_id("clientId", client_id)?;
        self.http.delete_empty(&format!("/clients/{client_id}")).await
    }

    /// GET /clients/{clientId}/stats
    pub async fn stats(&self, client_id: &str) -> Result<ApiResponse<ClientStats>> {
        let client_id = require_id("clientId", client_id)?;
        self.http
            .get(&format!("/clients/{client_id}/stats"), &QueryParams::new())
            .await
    }

    /// GET /clients/{clientId}/programs?page={page}&limit={limit}
    pub async fn programs(
        &self,
        client_id: &str,
        page: &PageParams,
    ) -> Result<PaginatedResponse<Program>> {
        let client_id = require_id("clientId", client_id)?;
        self.http
            .get(&format!("/clients/{client_id}/programs"), &page_query(page))
            .await
    }

    /// POST /clients/{clientId}/programs
    pub async fn assign_program(&self, client_id: &str, program_id: &str) -> Result<EmptyData> {
        let client_id = require_id("clientId", client_id)?;
        let program_id = require_id("programId", program_id)?;
        let request = AssignProgramRequest {
            program_id: program_id.to_string(),
        };
        self.http
            .post(&format!("/clients/{client_id}/programs"), Some(&request))
            .await
    }

    /// DELETE /clients/{clientId}/programs/{programId}
    pub async fn unassign_program(&self, client_id: &str, program_id: &str) -> Result<EmptyData> {
        let client_id = require_id("clientId", client_id)?;
        let program_id = require_id("programId", program_id)?;
        self.http
            .delete(&format!("/clients/{client_id}/programs/{program_id}"))
            .await
    }

    /// POST /clients/{clientId}/deactivate
    pub async fn deactivate(&self, client_id: &str) -> Result<EmptyData> {
        let client_id = require_id("clientId", client_id)?;
        self.http
            .post_empty(&format!("/clients/{client_id}/deactivate"))
            .await
    }

    /// POST /clients/{clientId}/activate
    pub async fn activate(&self, client_id: &str) -> Result<EmptyData> {
        let client_id = require_id("clientId", client_id)?;
        self.http
            .post_empty(&format!("/clients/{client_id}/activate"))
            .await
    }

    /// GET /clients/invite-code/{inviteCode}
    pub async fn by_invite_code(&self, invite_code: &str) -> Result<Value> {
        let invite_code = require_id("inviteCode", invite_code)?;
        self.http
            .get(
                &format!("/clients/invite-code/{invite_code}"),
                &QueryParams::new(),
            )
            .await
    }
}
