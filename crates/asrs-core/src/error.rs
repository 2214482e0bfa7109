use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid question id: {0} (expected 1..={max})", max = crate::models::answer::QUESTION_COUNT)]
    InvalidQuestionId(u8),

    #[error("invalid response value: {0} (expected 0..=4)")]
    InvalidResponseValue(u8),

    #[error("question index {0} is outside the questionnaire")]
    InvalidIndex(usize),

    #[error("unsupported record version {found} (this build reads up to {supported})")]
    UnsupportedRecordVersion { found: u32, supported: u32 },
}
