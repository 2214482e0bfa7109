use asrs_core::error::CoreError;
use asrs_instruments::error::InstrumentError;
use asrs_instruments::scoring::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid answer: {0}")]
    InvalidAnswer(#[from] ValidationError),

    #[error("assessment is complete; reset to start over")]
    Completed,

    #[error("instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    #[error("progress record error: {0}")]
    Record(#[from] CoreError),

    #[error("progress record could not be migrated: {0}")]
    Migration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
