//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honors `RUST_LOG`. Calling it twice is harmless; the second call is ignored.
pub fn init() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Initialize logging with a default filter used when `RUST_LOG` is unset
pub fn init_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
