/*
[INPUT]:  Carespace API response envelopes
[OUTPUT]: Typed envelope structs with success/data unwrapping
[POS]:    Data layer - inbound payloads for resource calls
[UPDATE]: When the response envelope changes
*/

use serde::{Deserialize, Deserializer, Serialize};

use super::models::User;
use crate::http::{CarespaceError, Result};

/// Standard `{ success, data, error, message }` envelope.
///
/// A JSON `null` (what an empty 2xx body decodes to) reads as a successful
/// envelope without data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match Option::<Envelope<T>>::deserialize(deserializer)? {
            Some(envelope) => ApiResponse {
                success: envelope.success,
                data: envelope.data,
                error: envelope.error,
                message: envelope.message,
            },
            None => ApiResponse {
                success: true,
                data: None,
                error: None,
                message: None,
            },
        })
    }
}

impl<T> ApiResponse<T> {
    /// Server-provided reason for a failed envelope.
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("unknown error")
            .to_string()
    }

    /// Unwrap `data`, failing with `Unsuccessful` when the envelope says so.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(CarespaceError::Unsuccessful {
                message: self.failure_message(),
            });
        }
        self.data.ok_or_else(|| CarespaceError::Unsuccessful {
            message: "response contained no data".to_string(),
        })
    }
}

/// Page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

/// Envelope for endpoints whose `data` carries nothing the SDK models.
pub type EmptyData = ApiResponse<serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Seconds until the access token expires; 0 when unknown
    #[serde(default)]
    pub expires_in: u64,
    pub user: User,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
