//! # Postcast Core
//!
//! The domain layer of the Postcast scheduler.
//! This crate owns the post model, the store that mutates the scheduled collection,
//! the persistence adapter and the single-slot notification emitter. Storage backends
//! live behind the ports defined here.

pub mod domain;
pub mod error;
pub mod form;
pub mod image;
pub mod listing;
pub mod notifier;
pub mod persistence;
pub mod ports;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{DomainError, ImageError};
pub use notifier::Notifier;
pub use persistence::PostPersistence;
pub use store::PostStore;
