use crate::libs::{messages::Message, watermark::FileWatermark};
use crate::msg_success;
use anyhow::Result;

/// Clears `history.json` so the next run starts from the configured look-back.
pub fn cmd() -> Result<()> {
    FileWatermark::in_data_storage()?.reset()?;
    msg_success!(Message::WatermarkReset);
    Ok(())
}
