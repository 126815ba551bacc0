/*
[INPUT]:  None (scoped by the caller's credentials)
[OUTPUT]: Aggregate statistics for the current organization
[POS]:    API layer - /stats endpoint (loosely typed JSON)
[UPDATE]: When stats endpoints change
*/

use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};

pub struct StatsResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> StatsResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// GET /stats
    pub async fn get(&self) -> Result<Value> {
        self.http.get("/stats", &QueryParams::new()).await
    }
}
