//! Tracing subscriber setup

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing on stderr so stdout stays clean for results.
/// - Respects `RUST_LOG` if set
/// - Falls back to `warn`, or `debug` with `--verbose`
/// - `FLEET_LOG_FORMAT=json` switches to JSON lines
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json = std::env::var("FLEET_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        let _ = fmt()
            .with_env_filter(env_filter)
            .json()
            .with_writer(io::stderr)
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(io::stderr)
            .try_init();
    }
}
