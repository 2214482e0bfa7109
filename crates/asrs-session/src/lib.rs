//! asrs-session
//!
//! The questionnaire state machine and everything around it: progress
//! persistence, the background write queue, reset confirmation, and the
//! host-facing [`assessment::Assessment`] that ties them together.

pub mod assessment;
pub mod config;
pub mod confirm;
pub mod engine;
pub mod error;
pub mod logging;
pub mod progress;
pub mod writer;
