/*
[INPUT]:  User identifiers and VR pairing codes
[OUTPUT]: Generated and validated VR headset codes
[POS]:    API layer - /vr endpoints (loosely typed JSON)
[UPDATE]: When VR pairing endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, Result};
use crate::resources::require_id;

/// VR headset pairing.
pub struct VrResource<'c> {
    http: &'c CarespaceHttpClient,
}

impl<'c> VrResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// POST /vr/generate-code/{userId}
    pub async fn generate_code(&self, user_id: &str) -> Result<Value> {
        let user_id = require_id("userId", user_id)?;
        self.http
            .post_empty(&format!("/vr/generate-code/{user_id}"))
            .await
    }

    /// POST /vr/validate-code
    pub async fn validate_code<B: Serialize + ?Sized>(&self, code: &B) -> Result<Value> {
        self.http.post("/vr/validate-code", Some(code)).await
    }
}
