pub mod init;
pub mod reset;
pub mod run;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Transfer time periodically until stopped (default)")]
    Watch,
    #[command(about = "Run a single transfer and exit")]
    Run,
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Forget the last execution date")]
    Reset,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command.unwrap_or(Commands::Watch) {
            Commands::Watch => watch::cmd().await,
            Commands::Run => run::cmd().await,
            Commands::Init(args) => init::cmd(args),
            Commands::Reset => reset::cmd(),
        }
    }
}
