use crate::libs::{config::Config, messages::Message, transfer::Transfer};
use crate::msg_info;
use anyhow::Result;

/// Runs one transfer against the stored configuration.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?.apply_env_overrides();
    let transfer = Transfer::from_config(&config)?;
    msg_info!(Message::TransferExecuting);
    transfer.run().await;
    Ok(())
}
