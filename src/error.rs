//! Error taxonomy for the harvest/aggregate pipeline.

use thiserror::Error;

/// Errors that can occur while harvesting or consolidating snapshots.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Network or HTTP failure after retries were exhausted, or a response
    /// body that was not valid JSON.
    #[error("transport error: {0}")]
    Transport(String),

    /// Missing or malformed district configuration.
    #[error("config error: {0}")]
    Config(String),

    /// API response or persisted row that does not match the fixed schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// Snapshot folder whose name does not parse as a harvest timestamp.
    #[error("malformed snapshot folder name: {0}")]
    MalformedFolderName(String),

    /// Aggregation found zero usable snapshots.
    #[error("no usable snapshot data under {0}")]
    NoData(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    /// Short classification label, attached when a per-district failure is
    /// logged and dropped so schema bugs stay distinguishable from
    /// transient transport failures.
    pub fn class(&self) -> &'static str {
        match self {
            PipelineError::Transport(_) => "transport",
            PipelineError::Config(_) => "config",
            PipelineError::Schema(_) => "schema",
            PipelineError::MalformedFolderName(_) => "folder-name",
            PipelineError::NoData(_) => "no-data",
            PipelineError::Io(_) => "io",
            PipelineError::Csv(_) => "csv",
        }
    }
}

/// Convenience result type.
pub type PipelineResult<T> = Result<T, PipelineError>;
