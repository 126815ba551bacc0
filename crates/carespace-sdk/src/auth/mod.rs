/*
[INPUT]:  API keys and login sessions
[OUTPUT]: Shared bearer credentials for the transport
[POS]:    Auth layer - holds the credential attached to Carespace requests
[UPDATE]: When auth flow or credential storage changes
*/

pub mod token;

pub use token::{TokenData, TokenStore};
