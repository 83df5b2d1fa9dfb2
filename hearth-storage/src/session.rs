//! Unit-of-work buffers and the session lifecycle.

use hearth_core::{Entity, EntityRegistry};

use crate::error::{Result, StorageError};

/// Staged-but-uncommitted work owned by one active session.
///
/// Insertions keep arrival order. Deletions ride along in the same commit.
#[derive(Debug, Default)]
pub(crate) struct Session {
    staged_inserts: Vec<Entity>,
    staged_deletes: Vec<Entity>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stage a record for insertion, rejecting kinds outside the registry.
    pub(crate) fn stage_insert(
        &mut self,
        registry: &EntityRegistry,
        entity: Entity,
    ) -> Result<()> {
        if !registry.contains(entity.kind()) {
            return Err(StorageError::UnknownType(entity.kind().to_string()));
        }
        self.staged_inserts.push(entity);
        Ok(())
    }

    /// Stage a record for deletion.
    pub(crate) fn stage_delete(&mut self, entity: Entity) {
        self.staged_deletes.push(entity);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.staged_inserts.is_empty() && self.staged_deletes.is_empty()
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.staged_inserts.len() + self.staged_deletes.len()
    }

    /// Drain the pending set. The session is empty afterwards regardless of
    /// whether the caller's commit succeeds.
    pub(crate) fn take_pending(&mut self) -> (Vec<Entity>, Vec<Entity>) {
        (
            std::mem::take(&mut self.staged_inserts),
            std::mem::take(&mut self.staged_deletes),
        )
    }
}

/// Lifecycle of the storage facade's session slot.
///
/// Only a reload moves to `Active`; closing moves to `Closed`. Every data
/// operation requires `Active` and fails hard otherwise.
#[derive(Debug)]
pub(crate) enum SessionState {
    Uninitialized,
    Active(Session),
    Closed,
}

impl SessionState {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Active(_) => "active",
            SessionState::Closed => "closed",
        }
    }
}
