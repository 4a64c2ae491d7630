#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Call sites use the `tracing` macros directly behind
//! `#[cfg(feature = "tracing")]`; this module re-exports them and offers a
//! JSON subscriber for hosts that want structured output.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Falls back to the `info` level when `RUST_LOG` is unset or invalid.
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
