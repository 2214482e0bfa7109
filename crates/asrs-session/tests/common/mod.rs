#![allow(dead_code)]

use asrs_core::models::answer::{AnswerMap, QuestionId, ResponseValue};
use asrs_core::models::session::SessionState;
use asrs_session::confirm::{ConfirmPrompt, ConfirmRequest, Confirmation};
use asrs_storage::error::StorageError;
use asrs_storage::objects::BoxFuture;
use asrs_storage::KeyValueStore;

pub const HOUR_MS: i64 = 60 * 60 * 1000;

pub fn answers(pairs: &[(u8, u8)]) -> AnswerMap {
    pairs
        .iter()
        .map(|(id, value)| {
            (
                QuestionId::try_from(*id).unwrap(),
                ResponseValue::try_from(*value).unwrap(),
            )
        })
        .collect()
}

pub fn session(current_index: usize, pairs: &[(u8, u8)]) -> SessionState {
    SessionState {
        current_index,
        answers: answers(pairs),
        saved_at: None,
    }
}

pub fn hours_before(now: jiff::Timestamp, hours: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_millisecond(now.as_millisecond() - hours * HOUR_MS).unwrap()
}

/// A store whose every operation fails.
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Vec<u8>, StorageError>> {
        Box::pin(async move {
            Err(StorageError::Read {
                key: key.to_string(),
                message: "disk unavailable".to_string(),
            })
        })
    }

    fn set<'a>(&'a self, key: &'a str, _body: Vec<u8>) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            Err(StorageError::Remove {
                key: key.to_string(),
                message: "disk unavailable".to_string(),
            })
        })
    }
}

/// A prompt that always answers the same way.
pub struct FixedPrompt(pub Confirmation);

impl ConfirmPrompt for FixedPrompt {
    fn confirm<'a>(&'a self, _request: &'a ConfirmRequest) -> BoxFuture<'a, Confirmation> {
        Box::pin(async move { self.0 })
    }
}
