/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Carespace SDK crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod client;
pub mod config;
pub mod http;
pub mod logging;
pub mod resources;
pub mod types;

pub use auth::{TokenData, TokenStore};
pub use client::CarespaceClient;
pub use config::{CarespaceConfig, LogLevel};
pub use http::{CarespaceError, CarespaceHttpClient, QueryParams, Result, RetryPolicy};
pub use logging::init_tracing;

// Re-export all types
pub use types::*;
