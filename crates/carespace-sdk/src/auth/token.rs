/*
[INPUT]:  API keys and login sessions (access/refresh tokens, expiry)
[OUTPUT]: Bearer credential retrieval and expiration status
[POS]:    Auth layer - credential lifecycle shared by every request
[UPDATE]: When adding token refresh or changing storage strategy
*/

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::LoginResponse;

/// Stored credential with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// `None` for API keys, which do not expire client-side
    pub expires_at: Option<DateTime<Utc>>,
}

/// Thread-safe credential store; clones share the same slot.
#[derive(Debug, Clone)]
pub struct TokenStore {
    data: Arc<RwLock<Option<TokenData>>>,
}

impl TokenStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a static API key. A blank key clears the store.
    pub fn set_api_key(&self, api_key: &str) {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            self.clear();
            return;
        }

        self.replace(Some(TokenData {
            access_token: api_key.to_string(),
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expires_at: None,
        }));
    }

    /// Store the tokens returned by a successful login or refresh
    pub fn set_session(&self, login: &LoginResponse) {
        // expires_in == 0 means the server did not say
        let expires_at = (login.expires_in > 0)
            .then(|| {
                i64::try_from(login.expires_in)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            })
            .flatten();
        let refresh_token = Some(login.refresh_token.clone()).filter(|token| !token.is_empty());

        self.replace(Some(TokenData {
            access_token: login.access_token.clone(),
            refresh_token,
            token_type: login.token_type.clone(),
            expires_at,
        }));
    }

    /// Value for the `Authorization: Bearer` header, if any
    pub fn bearer(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|data| data.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().and_then(|data| data.refresh_token.clone())
    }

    /// Check if the credential is missing or past its expiry
    pub fn is_expired(&self) -> bool {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(data) => data.expires_at.is_some_and(|at| Utc::now() >= at),
            None => true,
        }
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Clear the stored credential
    pub fn clear(&self) {
        self.replace(None);
    }

    fn replace(&self, value: Option<TokenData>) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = value;
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
