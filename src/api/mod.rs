//! Provider clients and the traits the transfer runs against.
//!
//! The transfer logic never talks HTTP directly. It reads raw entries from a
//! [`SourceProvider`] and replaces entries through a [`DestinationProvider`];
//! [`toggl::Toggl`] and [`clockify::Clockify`] are the production
//! implementations, tests plug in in-memory fakes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use toggl2clockify::api::{toggl::Toggl, SourceProvider, TogglConfig};
//! use chrono::NaiveDate;
//!
//! # async fn demo(config: TogglConfig) -> anyhow::Result<()> {
//! let toggl = Toggl::new(&config);
//! let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let to = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
//! let entries = toggl.list_time_entries(from, to, 1234).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Response;

pub mod clockify;
pub mod toggl;

pub use clockify::ClockifyConfig;
pub use toggl::TogglConfig;

/// A time entry as recorded by the source provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTimeEntry {
    /// Start timestamp exactly as the provider rendered it.
    pub start: String,
    /// Elapsed seconds; `None` while the timer is still running.
    pub duration: Option<i64>,
}

/// An entry already present in the destination project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationTimeEntry {
    pub id: String,
    pub project_id: Option<String>,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

/// A destination entry to be created, in local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeEntry {
    pub project_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Read side: the provider time is tracked in.
#[allow(async_fn_in_trait)]
pub trait SourceProvider {
    /// Lists entries of `project_id` starting in `[start, end)`.
    async fn list_time_entries(&self, start: NaiveDate, end: NaiveDate, project_id: u64) -> Result<Vec<SourceTimeEntry>>;
}

/// Write side: the provider daily totals are replaced in.
#[allow(async_fn_in_trait)]
pub trait DestinationProvider {
    /// Lists the configured user's entries of `project_id` overlapping `[start, end]`.
    async fn find_time_entries(&self, project_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<DestinationTimeEntry>>;

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<DestinationTimeEntry>;

    async fn delete_time_entry(&self, id: &str) -> Result<()>;
}

/// Turns a non-success response into an error carrying the provider's message.
pub(crate) async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        body
    };
    Err(msg_error_anyhow!(Message::ApiRequestFailed {
        service: service.to_string(),
        status: status.as_u16(),
        message,
    }))
}

/// Interprets a naive timestamp in the machine's timezone.
///
/// On a DST fold the earlier instant wins; a timestamp inside a DST gap is
/// an error.
pub fn local_to_utc(value: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&value)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| msg_error_anyhow!(Message::LocalTimeNotRepresentable(value.to_string())))
}

pub fn utc_to_local(value: DateTime<Utc>) -> NaiveDateTime {
    value.with_timezone(&Local).naive_local()
}
