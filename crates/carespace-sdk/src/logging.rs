/*
[INPUT]:  LogLevel from CarespaceConfig
[OUTPUT]: Optional global tracing subscriber scoped to this crate
[POS]:    Observability - opt-in helper for applications without their own subscriber
[UPDATE]: When changing log format or filter rules
*/

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;
use crate::http::{CarespaceError, Result};

/// `EnvFilter` directive limiting output to this crate at `level`.
pub fn filter_directive(level: LogLevel) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level.as_str())
}

/// Install a global fmt subscriber for the SDK's events.
///
/// Applications that already configure `tracing` should skip this; a second
/// install returns a `Config` error.
pub fn init_tracing(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(level))
        .map_err(|err| CarespaceError::Config(format!("invalid log filter: {err}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| CarespaceError::Config(format!("initialize tracing subscriber: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(LogLevel::Debug), "carespace_sdk=debug");
        assert_eq!(filter_directive(LogLevel::Off), "carespace_sdk=off");
    }

    #[test]
    fn test_second_init_is_an_error() {
        let _ = init_tracing(LogLevel::Warn);
        assert!(matches!(
            init_tracing(LogLevel::Warn),
            Err(CarespaceError::Config(_))
        ));
    }
}
