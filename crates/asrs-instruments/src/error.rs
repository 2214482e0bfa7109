use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("catalog for '{instrument_id}' is inconsistent: {reason}")]
    Catalog {
        instrument_id: String,
        reason: String,
    },
}
