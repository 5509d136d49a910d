//! One complete transfer run.
//!
//! A run resolves its window from the last execution date, then handles the
//! configured project mappings in order:
//!
//! ```text
//! for each mapping:
//!     validate ──▶ fetch every source project ──▶ aggregate ──▶ reconcile
//! ```
//!
//! and finally stores the window end as the new last execution date. A
//! failing mapping is logged and the run moves on to the next one; only a
//! failure to read or write the last execution date aborts the run, leaving
//! the stored date untouched so the next run covers the same window again.

use crate::api::clockify::Clockify;
use crate::api::toggl::Toggl;
use crate::api::{DestinationProvider, SourceProvider};
use crate::libs::config::{Config, ProjectMapping, TransferSettings};
use crate::libs::error::TransferError;
use crate::libs::messages::Message;
use crate::libs::reconciler::{DestinationReconciler, ReconcileOutcome};
use crate::libs::source_report::SourceReportFetcher;
use crate::libs::time_report::{aggregate, total_rounded_hours, TimeReportEntry};
use crate::libs::watermark::{FileWatermark, WatermarkStore};
use crate::{msg_error, msg_info, msg_success, msg_warning};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};

/// The `[start, end]` interval a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RunWindow {
    /// Starts at the last execution, or `default_days_since_now` days
    /// before `now` when there is none. Always ends at `now`.
    ///
    /// A look-back that does not fit the calendar is a configuration error.
    pub fn resolve(last_execution: Option<NaiveDateTime>, now: NaiveDateTime, default_days_since_now: i64) -> Result<Self, TransferError> {
        let start = match last_execution {
            Some(start) => start,
            None => Duration::try_days(default_days_since_now)
                .and_then(|look_back| now.checked_sub_signed(look_back))
                .ok_or_else(|| TransferError::Configuration(Message::InvalidLookBack(default_days_since_now).to_string()))?,
        };
        Ok(RunWindow { start, end: now })
    }

    /// Local midnight of the window's first day.
    ///
    /// Source reports cover whole days, so everything written for the first
    /// day lies at or after this point.
    pub fn first_day_start(&self) -> NaiveDateTime {
        self.start.date().and_time(NaiveTime::MIN)
    }
}

/// What happened to one mapping during a run.
#[derive(Debug)]
pub struct MappingReport {
    /// 1-based position in the configuration.
    pub index: usize,
    /// The aggregated per-day report, empty when the mapping was rejected.
    pub report: Vec<TimeReportEntry>,
    pub result: Result<ReconcileOutcome, TransferError>,
}

#[derive(Debug)]
pub struct RunReport {
    pub window: RunWindow,
    pub mappings: Vec<MappingReport>,
    pub watermark_saved: bool,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.mappings.iter().filter(|mapping| mapping.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.mappings.len() - self.succeeded()
    }
}

/// Drives transfers from a source to a destination provider.
pub struct Transfer<S, D, W> {
    source: S,
    destination: D,
    watermark: W,
    settings: TransferSettings,
}

impl<S, D, W> Transfer<S, D, W>
where
    S: SourceProvider,
    D: DestinationProvider,
    W: WatermarkStore,
{
    pub fn new(source: S, destination: D, watermark: W, settings: TransferSettings) -> Self {
        Self {
            source,
            destination,
            watermark,
            settings,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub fn watermark(&self) -> &W {
        &self.watermark
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    /// Runs a transfer ending now. Never fails: errors are logged and the
    /// next run starts over from whatever date is stored.
    pub async fn run(&self) {
        if let Err(e) = self.run_at(Local::now().naive_local()).await {
            msg_error!(Message::TransferFailed(e.to_string()));
        }
    }

    /// Runs a transfer whose window ends at `now`.
    pub async fn run_at(&self, now: NaiveDateTime) -> Result<RunReport, TransferError> {
        let last_execution = self.watermark.load().map_err(TransferError::Watermark)?;
        let window = RunWindow::resolve(last_execution, now, self.settings.default_days_since_now)?;

        if self.settings.project_mappings.is_empty() {
            msg_warning!(Message::NoProjectMappings);
            return Ok(RunReport {
                window,
                mappings: Vec::new(),
                watermark_saved: false,
            });
        }

        msg_info!(Message::TransferWindow(window.start.to_string(), window.end.to_string()));

        let mut mappings = Vec::with_capacity(self.settings.project_mappings.len());
        for (position, mapping) in self.settings.project_mappings.iter().enumerate() {
            let index = position + 1;
            let mapping_report = self.transfer_mapping(index, mapping, &window).await;
            if let Err(e) = &mapping_report.result {
                msg_error!(Message::MappingFailed(index, e.to_string()));
            }
            mappings.push(mapping_report);
        }

        self.watermark.save(window.end).map_err(TransferError::Watermark)?;
        msg_info!(Message::LastExecutionDate(window.end.to_string()));

        let report = RunReport {
            window,
            mappings,
            watermark_saved: true,
        };
        msg_success!(Message::TransferCompleted {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });

        Ok(report)
    }

    async fn transfer_mapping(&self, index: usize, mapping: &ProjectMapping, window: &RunWindow) -> MappingReport {
        let rejected = |message: Message| MappingReport {
            index,
            report: Vec::new(),
            result: Err(TransferError::Configuration(message.to_string())),
        };

        let Some(destination) = mapping.destination_project_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
            return rejected(Message::MappingMissingDestination(index));
        };
        let Some(source_ids) = mapping.source_project_ids.as_deref().filter(|ids| !ids.is_empty()) else {
            return rejected(Message::MappingMissingSources(index));
        };

        msg_info!(Message::MappingStarted(index, destination.to_string()));

        let fetcher = SourceReportFetcher::new(&self.source, &self.settings.start_format);
        let mut project_reports = Vec::with_capacity(source_ids.len());
        for &project_id in source_ids {
            project_reports.push(fetcher.fetch(window.start, window.end, project_id).await);
        }
        let report = aggregate(project_reports);

        msg_info!(Message::HoursWorked {
            start: window.start.to_string(),
            end: window.end.to_string(),
            hours: total_rounded_hours(&report),
        });

        let result = DestinationReconciler::new(&self.destination)
            .reconcile(&report, destination, window, self.settings.rounding)
            .await;

        MappingReport { index, report, result }
    }
}

impl Transfer<Toggl, Clockify, FileWatermark> {
    /// Wires the Toggl and Clockify clients and `history.json` from a
    /// validated configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (toggl, clockify) = config.validate()?;
        Ok(Self::new(
            Toggl::new(toggl),
            Clockify::new(clockify),
            FileWatermark::in_data_storage()?,
            config.transfer_settings(),
        ))
    }
}
