//! Replace-window reconciliation of a destination project.
//!
//! Everything the user has in the project from local midnight of the
//! window's first day up to its end is deleted, then one entry per
//! aggregated day is created, starting at local midnight.
//! The two phases are not transactional: if the process dies in between, the
//! window stays empty until the next run fills it again.

use crate::api::{DestinationProvider, NewTimeEntry};
use crate::libs::error::TransferError;
use crate::libs::messages::Message;
use crate::libs::time_report::{RoundingPolicy, TimeReportEntry};
use crate::libs::transfer::RunWindow;
use crate::{msg_error, msg_info};

/// Counts of what a reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub deleted: usize,
    pub delete_failed: usize,
    pub created: usize,
    pub create_failed: usize,
}

impl ReconcileOutcome {
    pub fn is_clean(&self) -> bool {
        self.delete_failed == 0 && self.create_failed == 0
    }
}

pub struct DestinationReconciler<'a, D> {
    destination: &'a D,
}

impl<'a, D: DestinationProvider> DestinationReconciler<'a, D> {
    pub fn new(destination: &'a D) -> Self {
        Self { destination }
    }

    /// Replaces the project's entries in `window` with `entries`.
    ///
    /// Fails only when the existing entries cannot be listed, in which case
    /// nothing is deleted or created. Single delete or create failures are
    /// logged and counted, the remaining operations still run.
    pub async fn reconcile(&self, entries: &[TimeReportEntry], project_id: &str, window: &RunWindow, rounding: RoundingPolicy) -> Result<ReconcileOutcome, TransferError> {
        let existing = self
            .destination
            .find_time_entries(project_id, window.first_day_start(), window.end)
            .await
            .map_err(|e| {
                msg_error!(Message::DestinationQueryFailed(project_id.to_string(), e.to_string()));
                TransferError::DestinationQuery(e)
            })?;

        let mut outcome = ReconcileOutcome::default();

        for entry in &existing {
            match self.destination.delete_time_entry(&entry.id).await {
                Ok(()) => outcome.deleted += 1,
                Err(e) => {
                    msg_error!(Message::DestinationDeleteFailed(entry.id.clone(), e.to_string()));
                    outcome.delete_failed += 1;
                }
            }
        }

        for entry in entries {
            let Some(end) = rounding.end_of(entry) else {
                msg_error!(Message::DestinationCreateFailed(entry.date().to_string(), Message::DurationOutOfRange.to_string()));
                outcome.create_failed += 1;
                continue;
            };
            let new_entry = NewTimeEntry {
                project_id: project_id.to_string(),
                start: entry.start(),
                end,
            };
            match self.destination.create_time_entry(&new_entry).await {
                Ok(_) => outcome.created += 1,
                Err(e) => {
                    msg_error!(Message::DestinationCreateFailed(entry.date().to_string(), e.to_string()));
                    outcome.create_failed += 1;
                }
            }
        }

        msg_info!(Message::ReconcileCompleted {
            project_id: project_id.to_string(),
            deleted: outcome.deleted,
            delete_failed: outcome.delete_failed,
            created: outcome.created,
            create_failed: outcome.create_failed,
        });

        Ok(outcome)
    }
}
