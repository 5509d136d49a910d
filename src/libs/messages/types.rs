#[derive(Debug, Clone)]
pub enum Message {
    // === APPLICATION MESSAGES ===
    AppStarting {
        name: String,
        version: String,
    },

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleToggl,
    ConfigModuleClockify,
    ConfigModuleMappings,
    ConfigModuleGeneral,
    ConfigModuleMissing(String), // module name
    ConfigInvalidRunInterval,
    ConfigRunInitFirst,
    InvalidSourceProjectIds(String), // raw input
    MappingAdded(usize),             // mapping count
    InvalidLookBack(i64),            // days
    ClockifyKeyWithoutSection,

    // === TRANSFER MESSAGES ===
    TransferExecuting,
    TransferWindow(String, String), // start, end
    NoProjectMappings,
    MappingStarted(usize, String), // index, destination project
    MappingMissingDestination(usize),
    MappingMissingSources(usize),
    MappingFailed(usize, String), // index, error
    HoursWorked {
        start: String,
        end: String,
        hours: i64,
    },
    LastExecutionDate(String),
    TransferCompleted {
        succeeded: usize,
        failed: usize,
    },
    TransferFailed(String), // error
    CommandFailed(String),  // error

    // === WATERMARK MESSAGES ===
    WatermarkReset,
    WatermarkNotSet,
    WatermarkCurrent(String),    // timestamp
    WatermarkUnreadable(String), // error
    WatermarkInvalidTimestamp(String),

    // === SOURCE MESSAGES ===
    SourceReportFailed(u64, String), // project id, error
    SourceReportFetched {
        project_id: u64,
        days: usize,
        skipped: usize,
    },
    SourceStartParseFailed(String, String), // raw value, format
    SourceDurationOutOfRange(i64),          // seconds

    // === DESTINATION MESSAGES ===
    DestinationQueryFailed(String, String),  // project id, error
    DestinationDeleteFailed(String, String), // entry id, error
    DestinationCreateFailed(String, String), // date, error
    DurationOutOfRange,
    ReconcileCompleted {
        project_id: String,
        deleted: usize,
        delete_failed: usize,
        created: usize,
        create_failed: usize,
    },

    // === API MESSAGES ===
    ApiRequestFailed {
        service: String,
        status: u16,
        message: String,
    },
    LocalTimeNotRepresentable(String), // naive timestamp

    // === SERVICE MESSAGES ===
    ServiceStarted(u64), // interval in hours
    ServiceStopped,
    ServiceShuttingDown,
    NextRunScheduled(u64), // hours
    ReceivedSigterm,
    ReceivedSigint,
    ReceivedCtrlC,
    CtrlCListenFailed(String), // error
    SignalHandlingNotSupported,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,

    // === FILE SYSTEM MESSAGES ===
    DataStoragePathError(String, String), // path, error

    // === PROMPTS ===
    PromptSelectModules,
    PromptTogglApiKey,
    PromptTogglApiUrl,
    PromptTogglStartFormat,
    PromptClockifyApiKey,
    PromptClockifyApiUrl,
    PromptClockifyWorkspaceId,
    PromptClockifyUserId,
    PromptSourceProjectIds,
    PromptDestinationProjectId,
    PromptAddAnotherMapping,
    PromptReplaceMappings,
    PromptDefaultDaysSinceNow,
    PromptShouldRoundTime,
    PromptRunIntervalInHours,
}
