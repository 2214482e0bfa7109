//! Storage key conventions.
//!
//! Pure string constants — no store dependency. These define the canonical
//! layout of records in the application's key-value store.

/// The single in-progress assessment record.
pub const PROGRESS: &str = "asrs/progress.json";
