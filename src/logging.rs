//! Logging setup for the demo binaries.

/// Install the global `tracing` subscriber.
///
/// Honors `RUST_LOG`; anything not matched there is filtered at `WARN`.
/// Calling it twice is harmless, the second install is ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .try_init();
}
