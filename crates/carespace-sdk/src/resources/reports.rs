/*
[INPUT]:  Report/user identifiers and report payloads
[OUTPUT]: Reports as JSON, CSV exports as text, Excel exports as bytes
[POS]:    API layer - /reports endpoints (loosely typed JSON)
[UPDATE]: When report endpoints or export formats change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

pub struct ReportsResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> ReportsResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// POST /reports
    pub async fn create<B: Serialize + ?Sized>(&self, report: &B) -> Result<Value> {
        self.http.post("/reports", Some(report)).await
    }

    /// POST /reports/create
    pub async fn create_by_feature_and_date<B: Serialize + ?Sized>(
        &self,
        report: &B,
    ) -> Result<Value> {
        self.http.post("/reports/create", Some(report)).await
    }

    /// GET /reports/users/{userId}
    pub async fn by_user(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .get(&format!("/reports/users/{user_id}"), &QueryParams::new())
            .await
    }

    /// GET /reports/{reportId}
    pub async fn get(&self, report_id: &str) -> Result<Value> {
        let report_id = require_id("reportId", report_id)?;
        self.http
            .get(&format!("/reports/{report_id}"), &QueryParams::new())
            .await
    }

    /// PATCH /reports/{reportId}
    pub async fn update<B: Serialize + ?Sized>(&self, report_id: &str, report: &B) -> Result<Value> {
        let report_id = require_id("reportId", report_id)?;
        self.http
            .patch(&format!("/reports/{report_id}"), Some(report))
            .await
    }

    /// DELETE /reports/{reportId}
    pub async fn delete(&self, report_id: &str) -> Result<Value> {
        let report_id = require_id("reportId", report_id)?;
        self.http.delete(&format!("/reports/{report_id}")).await
    }

    /// PATCH /reports/notes/{reportId}
    pub async fn update_notes<B: Serialize + ?Sized>(
        &self,
        report_id: &str,
        notes: &B,
    ) -> Result<Value> {
        let report_id = require_id("reportId", report_id)?;
        self.http
            .patch(&format!("/reports/notes/{report_id}"), Some(notes))
            .await
    }

    /// GET /reports/omnirom/csv
    pub async fn omnirom_csv(&self) -> Result<String> {
        self.http
            .get_text("/reports/omnirom/csv", &QueryParams::new())
            .await
    }

    /// GET /reports/letsmove/csv
    pub async fn letsmove_csv(&self) -> Result<String> {
        self.http
            .get_text("/reports/letsmove/csv", &QueryParams::new())
            .await
    }

    /// GET /reports/aggregate/excel (workbook bytes)
    pub async fn aggregate_excel(&self) -> Result<Vec<u8>> {
        self.http
            .get_bytes("/reports/aggregate/excel", &QueryParams::new())
            .await
    }
}
