//! Log subscriber set-up for the `folio` binary.

use tracing_subscriber::{EnvFilter, fmt};

use crate::CliError;

/// Environment variable consulted when `--log-level` is absent.
pub const ENV_LOG_LEVEL: &str = "FOLIO_LOG_LEVEL";
/// Filter used when neither the flag nor the environment sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive from the flag, the environment, or the default.
pub(crate) fn log_directive(flag: Option<&str>, env: Option<String>) -> String {
    flag.map(str::to_owned)
        .or(env)
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
}

/// Install a stderr `fmt` subscriber filtered by `directive`.
///
/// Records emitted through the `log` facade by the library crates are
/// forwarded to the subscriber. A subscriber installed earlier, for example
/// by a test harness, is left in place.
pub(crate) fn init_logging(directive: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(directive).map_err(|err| CliError::InvalidLogLevel {
        directive: directive.to_owned(),
        message: err.to_string(),
    })?;
    if fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        log::debug!("log subscriber already installed");
    }
    Ok(())
}
