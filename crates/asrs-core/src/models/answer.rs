use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of items in the questionnaire. Question ids run `1..=QUESTION_COUNT`.
pub const QUESTION_COUNT: u8 = 18;

/// Highest ordinal response ("Very Often").
pub const MAX_RESPONSE: u8 = 4;

/// A catalog question id, always within `1..=QUESTION_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuestionId(u8);

impl QuestionId {
    /// `None` when `id` is outside `1..=QUESTION_COUNT`. Usable in const tables.
    pub const fn new(id: u8) -> Option<Self> {
        if id >= 1 && id <= QUESTION_COUNT {
            Some(Self(id))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position of this question in display order.
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The question shown at a zero-based display position.
    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        if index < QUESTION_COUNT as usize {
            Ok(Self(index as u8 + 1))
        } else {
            Err(CoreError::InvalidIndex(index))
        }
    }

    /// Every id in display order.
    pub fn all() -> impl Iterator<Item = QuestionId> {
        (1..=QUESTION_COUNT).map(QuestionId)
    }
}

impl TryFrom<u8> for QuestionId {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=QUESTION_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidQuestionId(value))
        }
    }
}

impl From<QuestionId> for u8 {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ordinal response, `0` (Never) through `4` (Very Often).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ResponseValue(u8);

impl ResponseValue {
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_RESPONSE {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const NEVER: ResponseValue = ResponseValue(0);
    pub const VERY_OFTEN: ResponseValue = ResponseValue(MAX_RESPONSE);

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ResponseValue {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= MAX_RESPONSE {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidResponseValue(value))
        }
    }
}

impl From<ResponseValue> for u8 {
    fn from(value: ResponseValue) -> Self {
        value.0
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recorded answers keyed by question id.
///
/// An absent key means the question is unanswered; there is no placeholder
/// value for absence. Serialises as a JSON object keyed by the numeric id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, ResponseValue>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a response, overwriting any earlier one for the same question.
    /// Returns the value it replaced.
    pub fn insert(&mut self, id: QuestionId, value: ResponseValue) -> Option<ResponseValue> {
        self.0.insert(id, value)
    }

    pub fn get(&self, id: QuestionId) -> Option<ResponseValue> {
        self.0.get(&id).copied()
    }

    /// The recorded value, or `0` ("Never") when the question is unanswered.
    pub fn value_or_never(&self, id: QuestionId) -> u8 {
        self.get(id).unwrap_or(ResponseValue::NEVER).get()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, ResponseValue)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }
}

impl FromIterator<(QuestionId, ResponseValue)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, ResponseValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
