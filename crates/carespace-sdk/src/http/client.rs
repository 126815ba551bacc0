/*
[INPUT]:  CarespaceConfig (base URL, timeouts, credentials, headers, retry policy)
[OUTPUT]: Authenticated JSON requests with retry and typed error mapping
[POS]:    HTTP layer - core client implementation shared by all resources
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::error::{CarespaceError, Result};
use super::query::QueryParams;
use super::retry::RetryPolicy;
use crate::auth::TokenStore;
use crate::config::CarespaceConfig;

const JSON_MEDIA_TYPE: &str = "application/json";
// Exports come back as CSV or spreadsheet bodies
const ANY_MEDIA_TYPE: &str = "*/*";

/// Low-level transport for the Carespace API.
///
/// Cheap to clone; clones share credentials and default headers.
#[derive(Debug, Clone)]
pub struct CarespaceHttpClient {
    http_client: Client,
    base_url: Url,
    retry: RetryPolicy,
    tokens: TokenStore,
    default_headers: Arc<RwLock<HeaderMap>>,
    log_requests: bool,
}

impl CarespaceHttpClient {
    /// Create a transport from a validated configuration
    pub fn new(config: &CarespaceConfig) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| CarespaceError::Config(format!("failed to build HTTP client: {e}")))?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.insert(name, value);
        }

        let tokens = TokenStore::new();
        if let Some(api_key) = config.api_key.as_deref() {
            tokens.set_api_key(api_key);
        }

        Ok(Self {
            http_client,
            base_url: Url::parse(&config.base_url)?,
            retry: config.retry_policy(),
            tokens,
            default_headers: Arc::new(RwLock::new(default_headers)),
            log_requests: config.enable_logging,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Credential store used for the `Authorization` header
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Replace the bearer credential. A blank key clears it.
    pub fn set_api_key(&self, api_key: &str) {
        self.tokens.set_api_key(api_key);
    }

    pub fn clear_api_key(&self) {
        self.tokens.clear();
    }

    pub fn api_key(&self) -> Option<String> {
        self.tokens.bearer()
    }

    pub fn set_default_header(&self, name: &str, value: &str) -> Result<()> {
        let (name, value) = parse_header(name, value)?;
        self.default_headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, value);
        Ok(())
    }

    pub fn remove_default_header(&self, name: &str) {
        if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
            self.default_headers
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(name);
        }
    }

    /// Build full URL for an endpoint path, keeping any base path prefix
    pub fn url(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CarespaceError::Config(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// GET and deserialize the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> Result<T> {
        let body = self
            .execute(Method::GET, path, query, None, JSON_MEDIA_TYPE)
            .await?;
        decode(&body)
    }

    /// GET and return the body as text (CSV exports)
    pub async fn get_text(&self, path: &str, query: &QueryParams) -> Result<String> {
        let body = self
            .execute(Method::GET, path, query, None, ANY_MEDIA_TYPE)
            .await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// GET and return the raw body bytes (binary exports)
    pub async fn get_bytes(&self, path: &str, query: &QueryParams) -> Result<Vec<u8>> {
        self.execute(Method::GET, path, query, None, ANY_MEDIA_TYPE)
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// POST without a request body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json::<T, ()>(Method::POST, path, None).await
    }

    pub async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json::<T, ()>(Method::DELETE, path, None).await
    }

    /// DELETE, discarding whatever the server sends back
    pub async fn delete_empty(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, &QueryParams::new(), None, JSON_MEDIA_TYPE)
            .await
            .map(|_| ())
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        // Serialized once so every retry sends the same bytes
        let payload = body.map(serde_json::to_vec).transpose()?;
        let body = self
            .execute(method, path, &QueryParams::new(), payload, JSON_MEDIA_TYPE)
            .await?;
        decode(&body)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        payload: Option<Vec<u8>>,
        accept: &'static str,
    ) -> Result<Vec<u8>> {
        let url = self.url(path)?;
        self.retry
            .execute(|| {
                self.send_once(method.clone(), url.clone(), query, payload.clone(), accept)
            })
            .await
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        query: &QueryParams,
        payload: Option<Vec<u8>>,
        accept: &'static str,
    ) -> Result<Vec<u8>> {
        // Default headers go on after Accept so callers can still override it
        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .header(ACCEPT, accept)
            .headers(self.header_snapshot());
        if !query.is_empty() {
            builder = builder.query(query.pairs());
        }
        if let Some(token) = self.tokens.bearer() {
            builder = builder.bearer_auth(token);
        }
        if let Some(payload) = payload {
            builder = builder.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(payload);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            if self.log_requests {
                debug!(%method, %url, status = status.as_u16(), "Request succeeded");
            }
            Ok(body)
        } else {
            let text = String::from_utf8_lossy(&body);
            if self.log_requests {
                error!(%method, %url, status = status.as_u16(), body = %text, "Request failed");
            }
            Err(CarespaceError::from_response(status, &headers, &text))
        }
    }

    fn header_snapshot(&self) -> HeaderMap {
        self.default_headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| CarespaceError::Config(format!("invalid header name {name:?}: {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| CarespaceError::Config(format!("invalid value for header {name}: {e}")))?;
    Ok((header_name, header_value))
}

/// An empty 2xx body decodes as JSON `null`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(serde_json::from_value(serde_json::Value::Null)?)
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> CarespaceConfig {
        CarespaceConfig::default()
            .with_base_url(base_url)
            .with_retry(2, Duration::from_millis(1))
    }

    #[test]
    fn test_url_appends_segments() {
        let client = CarespaceHttpClient::new(&test_config("https://api.carespace.ai")).unwrap();
        assert_eq!(
            client.url("/users/u-1/activate").unwrap().as_str(),
            "https://api.carespace.ai/users/u-1/activate"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client =
            CarespaceHttpClient::new(&test_config("https://api.carespace.ai/api/v1/")).unwrap();
        assert_eq!(
            client.url("clients//stats").unwrap().as_str(),
            "https://api.carespace.ai/api/v1/clients/stats"
        );
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = CarespaceHttpClient::new(&test_config("https://api.carespace.ai")).unwrap();
        assert_eq!(
            client.url("/clients/invite-code/a b?c").unwrap().as_str(),
            "https://api.carespace.ai/clients/invite-code/a%20b%3Fc"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = CarespaceHttpClient::new(&CarespaceConfig::default().with_base_url("nope"));
        assert!(matches!(result, Err(CarespaceError::Config(_))));

        let config = CarespaceConfig::default().with_headers([("bad header", "x")]);
        assert!(matches!(
            CarespaceHttpClient::new(&config),
            Err(CarespaceError::Config(_))
        ));
    }

    #[test]
    fn test_api_key_management() {
        let client =
            CarespaceHttpClient::new(&CarespaceConfig::default().with_api_key("initial")).unwrap();
        assert_eq!(client.api_key(), Some("initial".to_string()));

        client.set_api_key("");
        assert_eq!(client.api_key(), None);

        client.set_api_key("next");
        client.clear_api_key();
        assert_eq!(client.api_key(), None);
    }

    #[tokio::test]
    async fn test_request_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/profile"))
            .and(header("authorization", "Bearer key_123"))
            .and(header("accept", "application/json"))
            .and(header("x-clinic-id", "clinic-9"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            CarespaceHttpClient::new(&test_config(&server.uri()).with_api_key("key_123")).unwrap();
        client.set_default_header("X-Clinic-Id", "clinic-9").unwrap();

        let body: serde_json::Value = client
            .get("/users/profile", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_query_and_body_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/programs"))
            .and(query_param("page", "2"))
            .and(query_param("search", "knee & hip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/reports/r-1"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"title": "Weekly"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri())).unwrap();
        let mut query = QueryParams::new();
        query.push("page", 2).push("search", "knee & hip");
        let list: Vec<serde_json::Value> = client.get("/programs", &query).await.unwrap();
        assert!(list.is_empty());

        let report: serde_json::Value = client
            .patch("/reports/r-1", Some(&json!({"title": "Weekly"})))
            .await
            .unwrap();
        assert_eq!(report["id"], "r-1");
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/u-1/activate"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri())).unwrap();
        let body: Option<serde_json::Value> = client.post_empty("/users/u-1/activate").await.unwrap();
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_export_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reports/omnirom/csv"))
            .and(header("accept", "*/*"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("a,b\n", "text/csv"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/reports/letsmove/csv"))
            .and(header("accept", "text/csv"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("c,d\n", "text/csv"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri())).unwrap();
        let csv = client
            .get_text("/reports/omnirom/csv", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(csv, "a,b\n");

        // A default Accept header replaces the built-in one
        client.set_default_header("Accept", "text/csv").unwrap();
        let csv = client
            .get_text("/reports/letsmove/csv", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(csv, "c,d\n");
    }

    #[tokio::test]
    async fn test_removed_default_header_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/reports/r-1"))
            .and(header_exists("x-trace"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/reports/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri()).without_retry()).unwrap();
        client.set_default_header("X-Trace", "1").unwrap();
        client.remove_default_header("X-Trace");

        client.delete_empty("/reports/r-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clients/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Client not found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri())).unwrap();
        let err = client
            .get::<serde_json::Value>("/clients/missing", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CarespaceError::NotFound { .. }));
        assert_eq!(err.to_string(), "Client not found");
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_then_succeed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"patients": 12})))
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri())).unwrap();
        let stats: serde_json::Value = client.get("/stats", &QueryParams::new()).await.unwrap();
        assert_eq!(stats["patients"], 12);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_serialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CarespaceHttpClient::new(&test_config(&server.uri())).unwrap();
        let err = client
            .get::<serde_json::Value>("/stats", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CarespaceError::Serialization(_)));
    }
}
