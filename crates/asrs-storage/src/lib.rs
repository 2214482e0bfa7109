//! asrs-storage
//!
//! Key-value persistence. A narrow get/set/remove seam with a directory-backed
//! store for devices and an in-memory store for hosts that bring their own.

pub mod error;
pub mod objects;
pub mod state;

pub use objects::{FileStore, KeyValueStore, MemoryStore};
