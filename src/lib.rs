//! # toggl2clockify
//!
//! A small service that copies tracked time from Toggl Track into Clockify.
//!
//! Every run sums the time of one or more Toggl projects per day and
//! replaces the matching window in a Clockify project with one entry per
//! day, optionally rounded to whole hours. The end of each run is stored so
//! the next one picks up where it left off.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use toggl2clockify::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
