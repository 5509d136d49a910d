//! Process-wide `tracing` subscriber setup.

use crate::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `info`, or at
/// `debug` when `T2C_DEBUG` is set. Calling it twice is harmless, the second
/// registration is ignored.
pub fn init() {
    let default_level = if is_debug_mode() { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("toggl2clockify={}", default_level)));

    let _ = tracing_subscriber::registry().with(env_filter).with(fmt::layer().with_target(false)).try_init();
}
