//! # Observability
//!
//! The container logs through `tracing` with structured fields:
//!
//! - `info` for lifecycle transitions (`Registered`, `Instantiated`, `Created`),
//! - `debug` for the traversal itself (tier hits, resolved dependencies, injected literals),
//! - `warn` for failures that population absorbs (unparsable literals, type mismatches).
//!
//! [`Container::get_by_name`](crate::Container::get_by_name) and
//! [`Container::populate`](crate::Container::populate) open spans, so a nested
//! resolution shows up inline as `get_by_name:populate:get_by_name: ...`.
//!
//! ```bash
//! # Lifecycle transitions only
//! RUST_LOG=info cargo run
//!
//! # Follow every field of every bean
//! RUST_LOG=bean_framework=debug cargo run
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once, at the start of the application.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
