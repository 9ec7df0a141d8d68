//! Logging setup for picker hosts.
//!
//! The engine emits `tracing` events when the `tracing` feature is enabled
//! (default). Hosts that do not install their own subscriber can call one of the
//! `init_*` helpers below.

/// Initialize a tracing subscriber with the default filter.
///
/// `RUST_LOG` takes precedence; otherwise the picker logs at `info` and
/// everything else at `warn`.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dear_file_picker=info,warn".into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Initialize a tracing subscriber with a custom filter directive.
#[cfg(feature = "tracing")]
pub fn init_tracing_with_filter(filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Initialize a verbose subscriber for development (`trace` for the picker).
#[cfg(feature = "tracing")]
pub fn init_tracing_dev() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dear_file_picker=trace,info".into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Without the `tracing` feature there is nothing to initialize.
#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

/// Without the `tracing` feature there is nothing to initialize.
#[cfg(not(feature = "tracing"))]
pub fn init_tracing_with_filter(_filter: &str) {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

/// Without the `tracing` feature there is nothing to initialize.
#[cfg(not(feature = "tracing"))]
pub fn init_tracing_dev() {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

macro_rules! picker_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

macro_rules! picker_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! picker_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}

pub(crate) use {picker_debug, picker_trace, picker_warn};

#[cfg(test)]
mod tests {
    #[test]
    fn logging_macros_expand_in_statement_position() {
        let cwd = std::path::Path::new("/tmp");
        picker_trace!(cwd = %cwd.display(), "test trace");
        picker_debug!(count = 3, "test debug");
        picker_warn!("test warn");
    }

    #[test]
    fn init_is_idempotent() {
        super::init_tracing_with_filter("dear_file_picker=trace");
        super::init_tracing();
    }
}
