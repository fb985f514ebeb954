//! Tracing/logging setup shared by the binary and black-box tests.

/// Tracing configuration (filters, formatter selection).
pub mod tracing;

pub use tracing::LogFormat;

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
