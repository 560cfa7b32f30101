//! Log subscriber setup for the command-line tool.
//!
//! Filter precedence: `RUST_LOG`, then the `-v` count, then the config's
//! `logging.filter`, then `warn`.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "warn";

/// The filter directive for `verbosity` (`-v` count) and the configured filter.
#[must_use]
pub fn filter_directive(verbosity: u8, configured: Option<&str>) -> String {
    match (verbosity, configured) {
        (0, Some(filter)) => filter.to_string(),
        (0, None) => DEFAULT_FILTER.to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init_tracing(verbosity: u8, configured: Option<&str>) {
    static INITIALISED: OnceLock<()> = OnceLock::new();

    INITIALISED.get_or_init(|| {
        let directive = filter_directive(verbosity, configured);
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
        let subscriber = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal())
            .with_target(false)
            .compact()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
