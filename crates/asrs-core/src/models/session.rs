use serde::{Deserialize, Serialize};

use super::answer::{AnswerMap, QUESTION_COUNT};
use crate::error::CoreError;

/// Current persisted record layout. Bump when the record shape changes and
/// teach the progress loader how to migrate from the previous one.
pub const RECORD_VERSION: u32 = 1;

/// In-memory session: which question is on screen and what has been answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Zero-based index of the question currently presented.
    pub current_index: usize,
    pub answers: AnswerMap,
    /// When this state was last written to the store. `None` until saved
    /// (or when freshly defaulted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<jiff::Timestamp>,
}

/// The persisted form of a [`SessionState`], stored as a single JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub record_version: u32,
    pub current_index: usize,
    pub answers: AnswerMap,
    pub saved_at: jiff::Timestamp,
}

impl ProgressRecord {
    /// Snapshot `state` as a record stamped with `saved_at`.
    pub fn stamp(state: &SessionState, saved_at: jiff::Timestamp) -> Self {
        Self {
            record_version: RECORD_VERSION,
            current_index: state.current_index,
            answers: state.answers.clone(),
            saved_at,
        }
    }

    /// Check the fields serde cannot: version and index bounds.
    /// Answer ids and values are already range-checked on deserialisation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.record_version > RECORD_VERSION {
            return Err(CoreError::UnsupportedRecordVersion {
                found: self.record_version,
                supported: RECORD_VERSION,
            });
        }
        if self.current_index >= QUESTION_COUNT as usize {
            return Err(CoreError::InvalidIndex(self.current_index));
        }
        Ok(())
    }

    pub fn into_state(self) -> SessionState {
        SessionState {
            current_index: self.current_index,
            answers: self.answers,
            saved_at: Some(self.saved_at),
        }
    }
}
