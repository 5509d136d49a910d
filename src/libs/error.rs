use thiserror::Error;

/// Failures a transfer run distinguishes between.
///
/// Source fetch failures and single delete/create failures never surface as
/// a `TransferError`: they are logged where they happen and the run goes on.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The mapping is unusable as configured. Fails that mapping only.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Existing destination entries could not be listed. Nothing was
    /// deleted or created for the mapping.
    #[error("Destination query error: {0}")]
    DestinationQuery(#[source] anyhow::Error),

    /// The last execution date could not be read or written. Aborts the run.
    #[error("Watermark error: {0}")]
    Watermark(#[source] anyhow::Error),
}
