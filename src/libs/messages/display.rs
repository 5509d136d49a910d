//! Display implementation for application messages.
//!
//! Every piece of text the service prints or logs is produced here, so the
//! wording of the transfer log stays in one place. Messages carrying dynamic
//! values interpolate them with `format!`.
//!
//! ```rust
//! use toggl2clockify::libs::messages::Message;
//!
//! let message = Message::MappingMissingDestination(2);
//! assert_eq!(
//!     message.to_string(),
//!     "Mapping #2 has no destination project id, skipping it"
//! );
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === APPLICATION MESSAGES ===
            Message::AppStarting { name, version } => format!("{} v{} starting", name, version),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleToggl => "Toggl settings".to_string(),
            Message::ConfigModuleClockify => "Clockify settings".to_string(),
            Message::ConfigModuleMappings => "Project mappings".to_string(),
            Message::ConfigModuleGeneral => "General settings".to_string(),
            Message::ConfigModuleMissing(module) => format!("The '{}' section is missing from the configuration", module),
            Message::ConfigInvalidRunInterval => "The run interval must be at least one hour".to_string(),
            Message::ConfigRunInitFirst => "Run 'toggl2clockify init' to create a configuration".to_string(),
            Message::InvalidSourceProjectIds(input) => format!("'{}' is not a comma separated list of project ids", input),
            Message::MappingAdded(count) => format!("{} project mapping(s) configured", count),
            Message::InvalidLookBack(days) => format!("A look-back of {} day(s) is out of range", days),
            Message::ClockifyKeyWithoutSection => "CLOCKIFY_API_KEY is set but the configuration has no clockify section, the key is ignored".to_string(),

            // === TRANSFER MESSAGES ===
            Message::TransferExecuting => "Executing scheduled Toggl2Clockify transfer".to_string(),
            Message::TransferWindow(start, end) => format!("Transferring time reports from {} to {}", start, end),
            Message::NoProjectMappings => "No project mappings were found in the configuration.".to_string(),
            Message::MappingStarted(index, destination) => format!("Processing mapping #{} into Clockify project {}", index, destination),
            Message::MappingMissingDestination(index) => format!("Mapping #{} has no destination project id, skipping it", index),
            Message::MappingMissingSources(index) => format!("Mapping #{} has no source project ids, skipping it", index),
            Message::MappingFailed(index, error) => format!("Mapping #{} failed: {}", index, error),
            Message::HoursWorked { start, end, hours } => format!("From {} to {} you have worked {} hours.", start, end, hours),
            Message::LastExecutionDate(date) => format!("The last execution date is: {}", date),
            Message::TransferCompleted { succeeded, failed } => {
                format!("Transfer finished: {} mapping(s) succeeded, {} failed", succeeded, failed)
            }
            Message::TransferFailed(error) => format!("Transfer aborted: {}", error),
            Message::CommandFailed(error) => format!("Command failed: {}", error),

            // === WATERMARK MESSAGES ===
            Message::WatermarkReset => "The last execution date has been cleared".to_string(),
            Message::WatermarkNotSet => "No transfer has completed yet".to_string(),
            Message::WatermarkCurrent(date) => format!("Last execution: {}", date),
            Message::WatermarkUnreadable(error) => format!("The stored last execution date is unreadable and will be overwritten: {}", error),
            Message::WatermarkInvalidTimestamp(value) => format!("Invalid last execution timestamp '{}'", value),

            // === SOURCE MESSAGES ===
            Message::SourceReportFailed(project_id, error) => {
                format!("Failed to get the Toggl time report for project {}: {}", project_id, error)
            }
            Message::SourceReportFetched { project_id, days, skipped } => {
                format!("Toggl project {}: {} day(s) with tracked time, {} running entries skipped", project_id, days, skipped)
            }
            Message::SourceStartParseFailed(value, format) => format!("Cannot parse start '{}' with format '{}'", value, format),
            Message::SourceDurationOutOfRange(seconds) => format!("Duration of {} seconds is out of range", seconds),

            // === DESTINATION MESSAGES ===
            Message::DestinationQueryFailed(project_id, error) => {
                format!("Failed to list Clockify entries for project {}, nothing was changed: {}", project_id, error)
            }
            Message::DestinationDeleteFailed(id, error) => format!("Failed to delete Clockify entry {}: {}", id, error),
            Message::DestinationCreateFailed(date, error) => format!("Failed to create Clockify entry for {}: {}", date, error),
            Message::DurationOutOfRange => "Entry duration is out of range".to_string(),
            Message::ReconcileCompleted {
                project_id,
                deleted,
                delete_failed,
                created,
                create_failed,
            } => format!(
                "Clockify project {}: deleted {} ({} failed), created {} ({} failed)",
                project_id, deleted, delete_failed, created, create_failed
            ),

            // === API MESSAGES ===
            Message::ApiRequestFailed { service, status, message } => format!("{} request failed with status {}: {}", service, status, message),
            Message::LocalTimeNotRepresentable(value) => format!("Local time {} does not exist in the current timezone", value),

            // === SERVICE MESSAGES ===
            Message::ServiceStarted(hours) => format!("Service is running, transferring every {} hour(s)", hours),
            Message::ServiceStopped => "Service stopped".to_string(),
            Message::ServiceShuttingDown => "Shutting down, no further transfers will be started".to_string(),
            Message::NextRunScheduled(hours) => format!("Next transfer in {} hour(s)", hours),
            Message::ReceivedSigterm => "Received SIGTERM".to_string(),
            Message::ReceivedSigint => "Received SIGINT".to_string(),
            Message::ReceivedCtrlC => "Received Ctrl+C".to_string(),
            Message::CtrlCListenFailed(error) => format!("Unable to listen for Ctrl+C: {}", error),
            Message::SignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),

            // === FILE SYSTEM MESSAGES ===
            Message::DataStoragePathError(path, error) => format!("Failed to create the data directory {}: {}", path, error),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptTogglApiKey => "Enter your Toggl API token".to_string(),
            Message::PromptTogglApiUrl => "Enter the Toggl API URL".to_string(),
            Message::PromptTogglStartFormat => "Enter the start timestamp format of Toggl entries".to_string(),
            Message::PromptClockifyApiKey => "Enter your Clockify API key".to_string(),
            Message::PromptClockifyApiUrl => "Enter the Clockify API URL".to_string(),
            Message::PromptClockifyWorkspaceId => "Enter your Clockify workspace id".to_string(),
            Message::PromptClockifyUserId => "Enter your Clockify user id".to_string(),
            Message::PromptSourceProjectIds => "Toggl project ids (comma separated)".to_string(),
            Message::PromptDestinationProjectId => "Clockify project id".to_string(),
            Message::PromptAddAnotherMapping => "Add another mapping?".to_string(),
            Message::PromptReplaceMappings => "Replace the existing project mappings?".to_string(),
            Message::PromptDefaultDaysSinceNow => "Days to look back on the first run".to_string(),
            Message::PromptShouldRoundTime => "Round daily totals to whole hours?".to_string(),
            Message::PromptRunIntervalInHours => "Hours between transfers".to_string(),
        };

        write!(f, "{}", text)
    }
}
