use asrs_core::models::answer::{AnswerMap, QuestionId, ResponseValue, QUESTION_COUNT};
use asrs_core::models::session::SessionState;
use asrs_instruments::instruments::asrs_v11::{self, AsrsV11};
use asrs_instruments::scoring::{Question, ResultSummary};
use asrs_instruments::Instrument;
use serde::Serialize;

use crate::error::SessionError;

const LAST_INDEX: usize = QUESTION_COUNT as usize - 1;

/// Where the questionnaire is in its lifecycle.
///
/// `InProgress -> Completed` happens only through [`QuestionnaireEngine::advance`]
/// on the last question. The only way back is [`QuestionnaireEngine::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Completed,
}

/// What happened to a state handed to [`QuestionnaireEngine::apply_restored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The restored state replaced the defaults.
    Applied,
    /// The user had already answered something; their input wins.
    Discarded,
    /// The state does not describe a position in this questionnaire.
    Rejected,
}

/// Owns the session state and enforces the sequencing rules.
///
/// Whether "Next" is enabled before the current question is answered is a
/// display decision; the engine permits [`advance`](Self::advance) regardless
/// and exposes [`is_answered`](Self::is_answered) for the caller to gate on.
#[derive(Debug, Clone)]
pub struct QuestionnaireEngine {
    state: SessionState,
    phase: Phase,
    user_interacted: bool,
}

impl Default for QuestionnaireEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionnaireEngine {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            phase: Phase::InProgress,
            user_interacted: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.state.answers
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Record (or overwrite) the answer to `question_id`. Position is unchanged.
    ///
    /// Raw values come straight from the display surface, so they are checked
    /// against the catalog; a rejected call leaves the state untouched.
    pub fn record_answer(&mut self, question_id: u8, value: u8) -> Result<(), SessionError> {
        if self.is_completed() {
            return Err(SessionError::Completed);
        }
        let (id, value) = AsrsV11.validate_response(question_id, value)?;
        self.state.answers.insert(id, value);
        self.user_interacted = true;
        Ok(())
    }

    /// Move to the next question, or complete the questionnaire from the last one.
    pub fn advance(&mut self) -> Phase {
        if self.phase == Phase::InProgress {
            if self.state.current_index < LAST_INDEX {
                self.state.current_index += 1;
            } else {
                self.phase = Phase::Completed;
            }
        }
        self.phase
    }

    /// Step back one question. No-op on the first question and once completed.
    pub fn retreat(&mut self) {
        if self.phase == Phase::InProgress && self.state.current_index > 0 {
            self.state.current_index -= 1;
        }
    }

    /// Back to question one with no answers. Counts as user input, so a
    /// restore arriving afterwards is discarded.
    pub fn reset(&mut self) {
        *self = Self::new();
        self.user_interacted = true;
    }

    pub fn current_question(&self) -> &'static Question {
        &asrs_v11::QUESTIONS[self.state.current_index]
    }

    /// `(current_index + 1) / total`, in `(0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        (self.state.current_index + 1) as f64 / f64::from(QUESTION_COUNT)
    }

    /// [`progress_fraction`](Self::progress_fraction) as a rounded percentage for display.
    pub fn progress_percent(&self) -> u32 {
        (self.progress_fraction() * 100.0).round() as u32
    }

    /// 1-based position of the current question.
    pub fn position(&self) -> usize {
        self.state.current_index + 1
    }

    pub fn is_last(&self) -> bool {
        self.state.current_index == LAST_INDEX
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.state.answers.contains(id)
    }

    pub fn answer_for(&self, id: QuestionId) -> Option<ResponseValue> {
        self.state.answers.get(id)
    }

    /// The scored result, available once the questionnaire is completed.
    pub fn results(&self) -> Option<ResultSummary> {
        self.is_completed().then(|| AsrsV11.score(&self.state.answers))
    }

    /// Adopt a state recovered from storage, unless the user has already
    /// answered or reset since this engine started, or has completed.
    pub fn apply_restored(&mut self, restored: SessionState) -> RestoreOutcome {
        if self.user_interacted || self.phase == Phase::Completed {
            return RestoreOutcome::Discarded;
        }
        if restored.current_index > LAST_INDEX {
            return RestoreOutcome::Rejected;
        }
        self.state = restored;
        self.phase = Phase::InProgress;
        RestoreOutcome::Applied
    }
}
