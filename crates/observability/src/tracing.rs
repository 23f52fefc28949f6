//! Tracing subscriber initialization.
//!
//! JSON lines with timestamps; the filter comes from `RUST_LOG` and defaults
//! to `info`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Build the env filter, falling back to [`DEFAULT_FILTER`] when `RUST_LOG`
/// is unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        ::tracing::info!(component = "observability", "subscriber installed");
    }
}
