//! Daily reports built from the source provider's raw entries.

use crate::api::{SourceProvider, SourceTimeEntry};
use crate::libs::messages::Message;
use crate::libs::time_report::TimeReportEntry;
use crate::{msg_debug, msg_error, msg_error_anyhow};
use anyhow::Result;
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Turns one source project's entries into per-day totals.
pub struct SourceReportFetcher<'a, S> {
    source: &'a S,
    start_format: &'a str,
}

impl<'a, S: SourceProvider> SourceReportFetcher<'a, S> {
    /// `start_format` is the chrono format of the entries' `start` field.
    pub fn new(source: &'a S, start_format: &'a str) -> Self {
        Self { source, start_format }
    }

    /// Report of `project_id` for the days from `start` through `end`.
    ///
    /// The provider is queried up to the day after `end` so the last day is
    /// complete. Any failure is logged and yields an empty report, leaving
    /// the other projects of the mapping unaffected.
    pub async fn fetch(&self, start: NaiveDateTime, end: NaiveDateTime, project_id: u64) -> Vec<TimeReportEntry> {
        match self.try_fetch(start, end, project_id).await {
            Ok(report) => report,
            Err(e) => {
                msg_error!(Message::SourceReportFailed(project_id, e.to_string()));
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, start: NaiveDateTime, end: NaiveDateTime, project_id: u64) -> Result<Vec<TimeReportEntry>> {
        let query_end = end.date().checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        let entries = self.source.list_time_entries(start.date(), query_end, project_id).await?;

        let total = entries.len();
        let report = group_by_day(&entries, self.start_format)?;
        let skipped = total - entries.iter().filter(|entry| has_recorded_duration(entry)).count();
        msg_debug!(Message::SourceReportFetched {
            project_id,
            days: report.len(),
            skipped,
        });

        Ok(report)
    }
}

/// Entries of a running timer carry no duration (or a negative one).
pub fn has_recorded_duration(entry: &SourceTimeEntry) -> bool {
    matches!(entry.duration, Some(seconds) if seconds >= 0)
}

/// Sums the recorded durations per start day.
///
/// The day is taken from the start timestamp as written, without timezone
/// conversion. A single unparsable start or out-of-range duration fails the
/// whole report.
pub fn group_by_day(entries: &[SourceTimeEntry], start_format: &str) -> Result<Vec<TimeReportEntry>> {
    let mut days: BTreeMap<NaiveDate, Duration> = BTreeMap::new();
    for entry in entries.iter().filter(|entry| has_recorded_duration(entry)) {
        let date = parse_start_date(&entry.start, start_format)?;
        let seconds = entry.duration.unwrap_or_default();
        let duration = Duration::try_seconds(seconds).ok_or_else(|| msg_error_anyhow!(Message::SourceDurationOutOfRange(seconds)))?;
        let total = days.entry(date).or_insert_with(Duration::zero);
        *total = total
            .checked_add(&duration)
            .ok_or_else(|| msg_error_anyhow!(Message::SourceDurationOutOfRange(seconds)))?;
    }

    Ok(days.into_iter().map(|(date, duration)| TimeReportEntry::new(date, duration)).collect())
}

/// Day of a textual start timestamp.
///
/// `start_format` is tried first. RFC 3339 timestamps, as the Toggl v9 API
/// returns them, are accepted as well; their day is read in the offset they
/// were recorded with.
pub fn parse_start_date(start: &str, start_format: &str) -> Result<NaiveDate> {
    let start = start.trim();
    NaiveDateTime::parse_from_str(start, start_format)
        .map(|start| start.date())
        .or_else(|_| DateTime::parse_from_rfc3339(start).map(|start| start.naive_local().date()))
        .map_err(|_| msg_error_anyhow!(Message::SourceStartParseFailed(start.to_string(), start_format.to_string())))
}
