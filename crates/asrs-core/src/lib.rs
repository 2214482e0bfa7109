//! asrs-core
//!
//! Pure domain types and storage key conventions.
//! No I/O — this is the shared vocabulary of the ASRS self-rating system.

pub mod error;
pub mod models;
pub mod storage_keys;
