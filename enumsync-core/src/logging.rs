//! Structured logging using **tracing**.
//!
//! Every pipeline step emits events through `tracing` macros: skipped
//! candidates and missing schema targets at `debug`, written artifacts
//! and executed statements at `info`. The JSON subscriber provides
//! machine-readable output for observability platforms.

/// Initializes the global tracing collector (subscriber).
///
/// Call once at process start. Events go to stderr as JSON lines so
/// stdout stays clean for tool output; `RUST_LOG` controls filtering
/// (e.g. `RUST_LOG=enumsync=debug`).
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
