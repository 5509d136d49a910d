//! The periodic transfer service behind the `watch` command.
//!
//! One transfer runs immediately, then the loop sleeps for the configured
//! interval and repeats. SIGTERM and SIGINT (Ctrl-C on Windows) request a
//! shutdown; a transfer already in progress is allowed to finish.

use crate::api::{DestinationProvider, SourceProvider};
use crate::libs::messages::Message;
use crate::libs::shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
use crate::libs::transfer::Transfer;
use crate::libs::watermark::WatermarkStore;
use crate::{msg_error, msg_info};
use std::time::Duration;
use tokio::task::JoinHandle;

const SECONDS_PER_HOUR: u64 = 60 * 60;

pub fn interval_from_hours(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR))
}

/// Runs the service until a termination signal arrives.
pub async fn run_with_signal_handling<S, D, W>(transfer: &Transfer<S, D, W>, interval: Duration)
where
    S: SourceProvider,
    D: DestinationProvider,
    W: WatermarkStore,
{
    let (sender, token) = shutdown_channel();
    let signals = spawn_signal_handler(sender);

    run_loop(transfer, interval, token).await;

    signals.abort();
}

/// Alternates transfers and cancellable sleeps until `token` fires.
pub async fn run_loop<S, D, W>(transfer: &Transfer<S, D, W>, interval: Duration, mut token: ShutdownToken)
where
    S: SourceProvider,
    D: DestinationProvider,
    W: WatermarkStore,
{
    msg_info!(Message::ServiceStarted(interval.as_secs() / SECONDS_PER_HOUR));

    loop {
        if token.is_shutdown() {
            break;
        }

        transfer.run().await;

        msg_info!(Message::NextRunScheduled(interval.as_secs() / SECONDS_PER_HOUR));
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = token.wait() => {
                msg_info!(Message::ServiceShuttingDown);
                break;
            }
        }
    }

    msg_info!(Message::ServiceStopped);
}

/// Forwards the first termination signal to `sender`.
pub fn spawn_signal_handler(sender: ShutdownSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        if wait_for_signal().await {
            sender.shutdown();
        }
    })
}

/// Returns `false` when no handler could be installed.
#[cfg(unix)]
async fn wait_for_signal() -> bool {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(_) => {
            msg_error!(Message::FailedToCreateSigtermHandler);
            return false;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(sigint) => sigint,
        Err(_) => {
            msg_error!(Message::FailedToCreateSigintHandler);
            return false;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            msg_info!(Message::ReceivedSigterm);
        }
        _ = sigint.recv() => {
            msg_info!(Message::ReceivedSigint);
        }
    }
    true
}

#[cfg(windows)]
async fn wait_for_signal() -> bool {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            msg_info!(Message::ReceivedCtrlC);
            true
        }
        Err(e) => {
            msg_error!(Message::CtrlCListenFailed(e.to_string()));
            false
        }
    }
}

#[cfg(not(any(unix, windows)))]
async fn wait_for_signal() -> bool {
    use crate::msg_warning;

    msg_warning!(Message::SignalHandlingNotSupported);
    false
}
