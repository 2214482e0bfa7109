use std::sync::Arc;

use asrs_core::models::answer::{AnswerMap, QuestionId, ResponseValue};
use asrs_core::models::session::SessionState;
use asrs_instruments::instruments::asrs_v11::AsrsV11;
use asrs_instruments::scoring::{Question, ResultSummary};
use asrs_instruments::Instrument;
use asrs_storage::{FileStore, KeyValueStore};

use crate::config::SessionConfig;
use crate::confirm::{ConfirmPrompt, Confirmation, RESET_REQUEST};
use crate::engine::{Phase, QuestionnaireEngine, RestoreOutcome};
use crate::error::SessionError;
use crate::progress::ProgressStore;
use crate::writer::ProgressWriter;

/// One self-rating session as the display surface sees it: the engine plus
/// its persistence side effects.
pub struct Assessment {
    engine: QuestionnaireEngine,
    writer: ProgressWriter,
    restore_pending: bool,
}

impl Assessment {
    /// Start a session on defaults without touching the store. Pair with
    /// [`restore`](Self::restore) once the saved progress has been loaded.
    ///
    /// Validates the instrument catalog and spawns the progress writer, so it
    /// must run inside a Tokio runtime.
    pub fn new<S>(progress: Arc<ProgressStore<S>>) -> Result<Self, SessionError>
    where
        S: KeyValueStore + 'static,
    {
        AsrsV11.validate_catalog()?;
        let (writer, _task) = ProgressWriter::spawn(progress);
        Ok(Self {
            engine: QuestionnaireEngine::new(),
            writer,
            restore_pending: true,
        })
    }

    /// Start a session and restore saved progress before returning.
    pub async fn open<S>(progress: Arc<ProgressStore<S>>) -> Result<Self, SessionError>
    where
        S: KeyValueStore + 'static,
    {
        let mut assessment = Self::new(Arc::clone(&progress))?;
        let loaded = progress.load().await;
        assessment.restore(loaded);
        Ok(assessment)
    }

    /// Start a session backed by the directory store named in `config`.
    pub async fn open_configured(config: &SessionConfig) -> eyre::Result<Self> {
        let data_dir = config.resolved_data_dir()?;
        tracing::info!(data_dir = %data_dir.display(), "opening assessment");
        let progress = Arc::new(ProgressStore::new(FileStore::new(data_dir)));
        Ok(Self::open(progress).await?)
    }

    /// Apply the result of the one startup load. Later calls are ignored.
    pub fn restore(&mut self, loaded: Option<SessionState>) -> Option<RestoreOutcome> {
        if !std::mem::take(&mut self.restore_pending) {
            tracing::debug!("restore already attempted, ignoring");
            return None;
        }
        let outcome = self.engine.apply_restored(loaded?);
        match outcome {
            RestoreOutcome::Applied => tracing::info!(
                current_index = self.engine.current_index(),
                "resumed saved assessment"
            ),
            RestoreOutcome::Discarded => {
                tracing::info!("saved progress arrived after the user answered; keeping current input")
            }
            RestoreOutcome::Rejected => tracing::warn!("saved progress does not fit the questionnaire"),
        }
        Some(outcome)
    }

    pub fn engine(&self) -> &QuestionnaireEngine {
        &self.engine
    }

    /// Record an answer and queue a save of the new state.
    pub fn record_answer(&mut self, question_id: u8, value: u8) -> Result<(), SessionError> {
        self.engine.record_answer(question_id, value)?;
        self.writer.save(self.engine.state().clone());
        Ok(())
    }

    pub fn advance(&mut self) -> Phase {
        let phase = self.engine.advance();
        if phase == Phase::Completed {
            tracing::info!(answered = self.engine.answers().len(), "assessment completed");
        }
        phase
    }

    pub fn retreat(&mut self) {
        self.engine.retreat();
    }

    /// Ask before resetting. Only an explicit confirmation resets the session
    /// and clears saved progress.
    pub async fn request_reset(&mut self, prompt: &dyn ConfirmPrompt) -> Confirmation {
        let choice = prompt.confirm(&RESET_REQUEST).await;
        if choice == Confirmation::Confirm {
            self.reset();
        }
        choice
    }

    fn reset(&mut self) {
        self.restore_pending = false;
        self.engine.reset();
        self.writer.clear();
        tracing::info!("assessment reset");
    }

    pub fn current_question(&self) -> &'static Question {
        self.engine.current_question()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.engine.progress_fraction()
    }

    pub fn progress_percent(&self) -> u32 {
        self.engine.progress_percent()
    }

    pub fn answers(&self) -> &AnswerMap {
        self.engine.answers()
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.engine.is_answered(id)
    }

    pub fn answer_for(&self, id: QuestionId) -> Option<ResponseValue> {
        self.engine.answer_for(id)
    }

    pub fn results(&self) -> Option<ResultSummary> {
        self.engine.results()
    }

    /// Wait for queued writes. Shutdown and tests only.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }
}
