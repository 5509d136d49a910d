//! Daily time report entries and the aggregation across source projects.
//!
//! A [`TimeReportEntry`] is one calendar day and the time tracked on it. The
//! source fetcher produces one collection per Toggl project; [`aggregate`]
//! folds those collections into a single per-day report for a Clockify
//! project.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Tracked time for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeReportEntry {
    date: NaiveDate,
    work_duration: Duration,
}

impl TimeReportEntry {
    /// Negative durations are clamped to zero.
    pub fn new(date: NaiveDate, work_duration: Duration) -> Self {
        Self {
            date,
            work_duration: work_duration.max(Duration::zero()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn work_duration(&self) -> Duration {
        self.work_duration
    }

    pub fn total_hours(&self) -> f64 {
        self.work_duration.num_seconds() as f64 / SECONDS_PER_HOUR
    }

    /// Whole hours, rounded half to even (2.5h -> 2h, 3.5h -> 4h).
    pub fn total_hours_rounded(&self) -> i64 {
        self.total_hours().round_ties_even() as i64
    }

    /// Local midnight of the entry's day.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(chrono::NaiveTime::MIN)
    }
}

/// How a daily total becomes the length of the destination entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingPolicy {
    /// Use the tracked duration as is.
    Exact,
    /// Round to the nearest whole hour, ties to even.
    NearestHour,
}

impl RoundingPolicy {
    pub fn from_flag(should_round_time: bool) -> Self {
        if should_round_time {
            RoundingPolicy::NearestHour
        } else {
            RoundingPolicy::Exact
        }
    }

    /// `None` when the rounded hours do not fit a duration.
    pub fn duration_of(&self, entry: &TimeReportEntry) -> Option<Duration> {
        match self {
            RoundingPolicy::Exact => Some(entry.work_duration()),
            RoundingPolicy::NearestHour => Duration::try_hours(entry.total_hours_rounded()),
        }
    }

    /// End of the destination entry that starts at the entry's midnight,
    /// `None` when it falls outside the calendar.
    pub fn end_of(&self, entry: &TimeReportEntry) -> Option<NaiveDateTime> {
        self.duration_of(entry).and_then(|duration| entry.start().checked_add_signed(duration))
    }
}

/// Merges per-project reports into one entry per day.
///
/// Durations of the same date are summed across all collections, saturating
/// at the largest representable duration. Days whose total is zero are
/// dropped. The result is ordered by date.
pub fn aggregate<I>(collections: I) -> Vec<TimeReportEntry>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = TimeReportEntry>,
{
    let mut totals: BTreeMap<NaiveDate, Duration> = BTreeMap::new();
    for entry in collections.into_iter().flatten() {
        let total = totals.entry(entry.date()).or_insert_with(Duration::zero);
        *total = total.checked_add(&entry.work_duration()).unwrap_or(Duration::MAX);
    }

    totals
        .into_iter()
        .filter(|(_, duration)| *duration > Duration::zero())
        .map(|(date, duration)| TimeReportEntry::new(date, duration))
        .collect()
}

/// Sum of [`TimeReportEntry::total_hours_rounded`] over a report.
pub fn total_rounded_hours(entries: &[TimeReportEntry]) -> i64 {
    entries.iter().map(TimeReportEntry::total_hours_rounded).fold(0, i64::saturating_add)
}
