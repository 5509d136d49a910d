use crate::libs::{
    config::Config,
    daemon::{self, interval_from_hours},
    transfer::Transfer,
};
use anyhow::Result;

/// Runs the transfer service until SIGTERM or SIGINT.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?.apply_env_overrides();
    let transfer = Transfer::from_config(&config)?;
    daemon::run_with_signal_handling(&transfer, interval_from_hours(config.general.run_interval_in_hours)).await;
    Ok(())
}
