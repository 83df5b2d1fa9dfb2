//! hearth-storage: MySQL persistence for the hearth entity set.
//!
//! One [`DbStorage`] value owns a pooled connection and at most one active
//! unit-of-work session: stage records with [`DbStorage::add`], commit them
//! atomically with [`DbStorage::save`], and read committed state back as
//! identity-keyed maps with [`DbStorage::all`].

pub mod config;
pub mod error;
pub mod storage;

mod engine;
mod query;
mod session;

pub use config::{Mode, StorageConfig};
pub use error::{Result, StorageError};
pub use storage::DbStorage;

pub use hearth_core::{Entity, EntityKind, EntityRegistry};
