//! Storage implementations - durable files and in-memory fallback.

mod memory;

pub use memory::InMemoryStorage;

#[cfg(feature = "file")]
mod file;
#[cfg(feature = "file")]
pub use file::FileStorage;
