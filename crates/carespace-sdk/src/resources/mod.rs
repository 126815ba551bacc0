/*
[INPUT]:  Shared transport plus per-group endpoint arguments
[OUTPUT]: One thin resource per Carespace API group
[POS]:    API layer - maps SDK calls onto REST endpoints
[UPDATE]: When the backend adds or renames an API group
*/

mod activity_stream;
mod auth;
mod clients;
mod evaluations;
mod plans;
mod posture;
mod programs;
mod reports;
mod rom;
mod settings;
mod stats;
mod surveys;
mod users;
mod vr;

pub use activity_stream::ActivityStreamResource;
pub use auth::AuthResource;
pub use clients::ClientsResource;
pub use evaluations::EvaluationsResource;
pub use plans::PlansResource;
pub use posture::PostureResource;
pub use programs::ProgramsResource;
pub use reports::ReportsResource;
pub use rom::RomResource;
pub use settings::SettingsResource;
pub use stats::StatsResource;
pub use surveys::SurveysResource;
pub use users::UsersResource;
pub use vr::VrResource;

use crate::http::{CarespaceError, QueryParams, Result};
use crate::types::PageParams;

/// Reject blank identifiers and ones that would escape their path segment.
pub(crate) fn require_id<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CarespaceError::InvalidArgument(format!("{name} is required")));
    }
    if trimmed.contains('/') {
        return Err(CarespaceError::InvalidArgument(format!(
            "{name} must not contain '/'"
        )));
    }
    Ok(trimmed)
}

pub(crate) fn page_query(page: &PageParams) -> QueryParams {
    let mut query = QueryParams::new();
    query.push("page", page.page).push("limit", page.limit);
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("userId", " u-1 ").unwrap(), "u-1");
        assert!(matches!(
            require_id("userId", "  "),
            Err(CarespaceError::InvalidArgument(msg)) if msg == "userId is required"
        ));
        assert!(require_id("userId", "a/b").is_err());
    }

    #[test]
    fn test_page_query() {
        let query = page_query(&PageParams { page: 3, limit: 10 });
        assert_eq!(query.get("page"), Some("3"));
        assert_eq!(query.get("limit"), Some("10"));
    }
}
