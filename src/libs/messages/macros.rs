//! Messaging macros routing [`Message`](super::Message) values onto `tracing`.
//!
//! The service runs unattended, so every message ends up as a log event. The
//! macros only pick the level and a prefix; where the events go (stderr,
//! journald through stdout capture, a filter level) is decided once by
//! [`crate::libs::logging::init`].
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: plain informational line without prefix
//! - **`msg_success!`**: success notifications with ✅ prefix
//! - **`msg_info!`**: informational messages with ℹ️ prefix
//! - **`msg_warning!`**: warnings with ⚠️ prefix
//! - **`msg_error!`**: errors with ❌ prefix
//! - **`msg_debug!`**: debug-level diagnostics with 🔍 prefix
//! - **`msg_error_anyhow!`** / **`msg_bail_anyhow!`**: build or return an `anyhow::Error`
//!
//! ```rust
//! use toggl2clockify::libs::messages::Message;
//! use toggl2clockify::{msg_error, msg_info};
//!
//! msg_info!(Message::TransferExecuting);
//! msg_error!(Message::SourceReportFailed(42, "timeout".to_string()));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `T2C_DEBUG` is set.
///
/// Checked once and cached; the logging setup uses it to lower the default
/// filter to `debug` when `RUST_LOG` is not given.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("T2C_DEBUG").is_ok())
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {{
        tracing::info!("{}", $msg);
    }};
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {{
        tracing::info!("✅ {}", $msg);
    }};
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {{
        tracing::error!("❌ {}", $msg);
    }};
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {{
        tracing::warn!("⚠️ {}", $msg);
    }};
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {{
        tracing::info!("ℹ️ {}", $msg);
    }};
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {{
        tracing::debug!("🔍 {}", $msg);
    }};
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
