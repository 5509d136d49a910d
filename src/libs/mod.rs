//! Core library modules of the transfer service.
//!
//! ## Layout
//!
//! - **Infrastructure**: configuration, data storage, messages, logging, errors
//! - **Reporting**: per-day time reports, source report fetching, aggregation
//! - **Transfer**: destination reconciliation, the run orchestrator, the watermark
//! - **Service**: the periodic loop and its shutdown signalling
//!
//! ```rust,no_run
//! use toggl2clockify::libs::config::Config;
//! use toggl2clockify::libs::transfer::Transfer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::read()?.apply_env_overrides();
//! Transfer::from_config(&config)?.run().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod error;
pub mod logging;
pub mod messages;
pub mod reconciler;
pub mod shutdown;
pub mod source_report;
pub mod time_report;
pub mod transfer;
pub mod watermark;
