//! Telemetry helpers for applications embedding `canvas-rules`.
//!
//! Rule evaluation emits `tracing` events (`debug` per validated node,
//! `trace` for operand resolution, `warn` on operand type mismatches).
//! Consumers can either call `init_default_tracing` or wire their own
//! `tracing` subscriber and filters.

/// Filter used when `RUST_LOG` is unset: rule engine events at `info`,
/// everything else at `warn`.
pub const DEFAULT_TRACING_FILTER: &str = "warn,canvas_rules=info";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when the host
/// application already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
