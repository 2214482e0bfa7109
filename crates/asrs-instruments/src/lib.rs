//! asrs-instruments
//!
//! Self-report instrument definitions. Pure data — no storage dependency.
//! Defines the question catalog, response options, and scoring rules for
//! each supported instrument.

pub mod error;
pub mod instruments;
pub mod scoring;

use asrs_core::models::answer::{AnswerMap, QuestionId, ResponseValue};

use error::InstrumentError;
use scoring::{Question, ResponseOption, ResultSummary, ValidationError};

/// Trait implemented by each self-report instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "asrs_v11").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "ASRS-v1.1").
    fn name(&self) -> &str;

    /// Every question, in display order.
    fn questions(&self) -> &[Question];

    /// The answer choices offered for each question.
    fn response_options(&self) -> &[ResponseOption];

    /// Score an answer map. Total: defined for partial and empty maps.
    fn score(&self, answers: &AnswerMap) -> ResultSummary;

    /// Check the instrument's static tables for internal consistency.
    fn validate_catalog(&self) -> Result<(), InstrumentError>;

    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    fn response_option(&self, value: ResponseValue) -> Option<&ResponseOption> {
        self.response_options().iter().find(|o| o.value == value)
    }

    /// Validate a raw (question id, response) pair coming from the display
    /// surface against this instrument's catalog.
    fn validate_response(
        &self,
        question_id: u8,
        value: u8,
    ) -> Result<(QuestionId, ResponseValue), ValidationError> {
        let reject = |reason: &str| ValidationError {
            question_id,
            value,
            message: format!("{}: {reason}", self.name()),
        };

        let id = QuestionId::try_from(question_id)
            .ok()
            .filter(|id| self.question(*id).is_some())
            .ok_or_else(|| reject(&format!("no question with id {question_id}")))?;
        let response = ResponseValue::try_from(value)
            .ok()
            .filter(|v| self.response_option(*v).is_some())
            .ok_or_else(|| reject(&format!("{value} is not a response option")))?;

        Ok((id, response))
    }

    /// Format answers as structured text, grouped by category.
    fn to_structured_input(&self, answers: &AnswerMap) -> String {
        let mut output = format!("## {}\n\n", self.name());
        let mut categories = Vec::new();
        for question in self.questions() {
            if !categories.contains(&question.category) {
                categories.push(question.category);
            }
        }

        for category in categories {
            output.push_str(&format!("### {}\n", category.label()));
            for question in self.questions().iter().filter(|q| q.category == category) {
                if let Some(value) = answers.get(question.id) {
                    let label = self
                        .response_option(value)
                        .map(|o| o.label)
                        .unwrap_or("?");
                    output.push_str(&format!("- Q{}: {} ({})\n", question.id, label, value));
                }
            }
            output.push('\n');
        }
        output
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::asrs_v11::AsrsV11)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
