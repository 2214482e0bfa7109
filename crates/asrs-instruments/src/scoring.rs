use asrs_core::models::answer::{QuestionId, ResponseValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// The symptom subscale a question contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    Inattention,
    Hyperactivity,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Inattention => "Inattention",
            Category::Hyperactivity => "Hyperactivity",
        }
    }
}

/// A single catalog item. Display order is id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: &'static str,
    pub category: Category,
    pub is_screener: bool,
}

/// One of the ordinal answer choices offered for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseOption {
    pub value: ResponseValue,
    pub label: &'static str,
    /// Hex accent used by the display surface. Carries no scoring meaning.
    pub accent: &'static str,
}

/// Minimum response for a screener question to count as a positive indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenerItem {
    pub id: QuestionId,
    pub threshold: u8,
}

/// Scored snapshot of an answer map. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultSummary {
    /// Screener items at or above their threshold (0–6).
    pub screener_score: u32,
    pub screener_positive: bool,
    pub inattention_score: u32,
    pub hyperactivity_score: u32,
    pub total_score: u32,
    /// Highest reachable total (every item answered "Very Often").
    pub max_score: u32,
    pub answered_count: u32,
}

/// Headline and explanatory text for a scored result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub positive: bool,
    pub title: &'static str,
    pub message: &'static str,
}

/// Raw input from the display surface that does not name a catalog answer.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: u8,
    pub value: u8,
    pub message: String,
}
