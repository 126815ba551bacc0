/*
[INPUT]:  Client configuration and API endpoint paths
[OUTPUT]: HTTP responses, typed API results, structured errors
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding transport features or changing client behavior
*/

pub mod client;
pub mod error;
pub mod query;
pub mod retry;

pub use client::CarespaceHttpClient;
pub use error::{CarespaceError, Result};
pub use query::QueryParams;
pub use retry::RetryPolicy;
