use dotenv::dotenv;
use toggl2clockify::commands::Cli;
use toggl2clockify::libs::data_storage::{APP_NAME, APP_VERSION};
use toggl2clockify::libs::logging;
use toggl2clockify::libs::messages::Message;
use toggl2clockify::{msg_error, msg_info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init();

    msg_info!(Message::AppStarting {
        name: APP_NAME.to_string(),
        version: APP_VERSION.to_string(),
    });

    if let Err(e) = Cli::menu().await {
        msg_error!(Message::CommandFailed(e.to_string()));
        return Err(e);
    }
    Ok(())
}
