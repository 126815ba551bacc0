/*
[INPUT]:  Settings identifiers and settings payloads
[OUTPUT]: Organization settings, templates, themes, plan and goal settings
[POS]:    API layer - /settings endpoints (loosely typed JSON)
[UPDATE]: When settings endpoints change
*/

use serde::Serialize;
use serde_json::Value;

use crate::http::{CarespaceHttpClient, QueryParams, Result};
use crate::resources::require_id;

/// Organization-wide settings. Every named section supports get and upsert.
pub struct SettingsResource<'c> {
    http: &'c CarespaceHttpClient,
}

/// Generates a `GET` reader and `POST` upsert pair for one settings section.
macro_rules! settings_section {
    ($get:ident, $upsert:ident, $path:literal) => {
        #[doc = concat!("GET ", $path)]
        pub async fn $get(&self) -> Result<Value> {
            self.http.get($path, &QueryParams::new()).await
        }

        #[doc = concat!("POST ", $path)]
        pub async fn $upsert<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
            self.http.post($path, Some(body)).await
        }
    };
}

impl<'c> SettingsResource<'c> {
    pub(crate) fn new(http: &'c CarespaceHttpClient) -> Self {
        Self { http }
    }

    /// GET /settings
    pub async fn list(&self) -> Result<Value> {
        self.http.get("/settings", &QueryParams::new()).await
    }

    /// POST /settings
    pub async fn create<B: Serialize + ?Sized>(&self, settings: &B) -> Result<Value> {
        self.http.post("/settings", Some(settings)).await
    }

    /// PATCH /settings/{settingsId}
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        settings_id: &str,
        settings: &B,
    ) -> Result<Value> {
        let settings_id = require_id("settingsId", settings_id)?;
        self.http
            .patch(&format!("/settings/{settings_id}"), Some(settings))
            .await
    }

    settings_section!(email_template, upsert_email_template, "/settings/templates/email");
    settings_section!(invite_template, upsert_invite_template, "/settings/templates/invite");
    settings_section!(
        rom_email_template,
        upsert_rom_email_template,
        "/settings/templates/email/rom"
    );
    settings_section!(themes, upsert_themes, "/settings/themes");
    settings_section!(network, upsert_network, "/settings/network");
    settings_section!(
        premium_plans_status,
        upsert_premium_plans_status,
        "/settings/premium-plans/status"
    );
    settings_section!(plans, upsert_plans, "/settings/plans");
    settings_section!(
        functional_goals,
        upsert_functional_goals,
        "/settings/functional-goals"
    );
    settings_section!(
        pre_existing_conditions,
        upsert_pre_existing_conditions,
        "/settings/pre-existing-conditions"
    );
}
