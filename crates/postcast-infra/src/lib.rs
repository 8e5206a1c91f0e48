//! # Postcast Infrastructure
//!
//! Concrete implementations of the storage port defined in `postcast-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All backends enabled
//! - `minimal` - In-memory storage only
//! - `file` - Durable file-per-key storage

pub mod storage;

pub use storage::InMemoryStorage;

#[cfg(feature = "file")]
pub use storage::FileStorage;
