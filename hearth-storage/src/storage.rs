//! The storage facade: one owned unit-of-work session over a pooled engine.

use std::collections::HashMap;

use hearth_core::{Entity, EntityKind, EntityRegistry};

use crate::config::StorageConfig;
use crate::engine::Engine;
use crate::error::{Result, StorageError};
use crate::query;
use crate::session::{Session, SessionState};

/// Storage facade owning the connection engine and at most one active
/// session.
///
/// All mutating operations take `&mut self`, so staging and commits on a
/// shared instance can never interleave; reads take `&self` and may run
/// concurrently with each other. Reads reflect committed state only:
/// records staged with [`add`] stay invisible until [`save`] commits them.
///
/// [`add`]: DbStorage::add
/// [`save`]: DbStorage::save
pub struct DbStorage {
    engine: Engine,
    registry: EntityRegistry,
    state: SessionState,
    reset_pending: bool,
}

impl DbStorage {
    /// Connect eagerly, verifying the database is reachable.
    ///
    /// In [`Mode::Test`] every known table is dropped here, before any
    /// schema creation, so each test run starts from an empty schema.
    ///
    /// [`Mode::Test`]: crate::config::Mode::Test
    pub async fn connect(config: StorageConfig, registry: EntityRegistry) -> Result<Self> {
        let engine = Engine::connect(&config).await?;
        if config.is_test() {
            engine.reset_schema().await?;
        }
        Ok(Self {
            engine,
            registry,
            state: SessionState::Uninitialized,
            reset_pending: false,
        })
    }

    /// Connect without touching the network; connectivity errors surface on
    /// first use. In test mode the destructive reset is deferred to the
    /// first [`reload`], still ahead of any schema creation.
    ///
    /// [`reload`]: DbStorage::reload
    pub fn connect_lazy(config: StorageConfig, registry: EntityRegistry) -> Result<Self> {
        let reset_pending = config.is_test();
        let engine = Engine::connect_lazy(&config)?;
        Ok(Self {
            engine,
            registry,
            state: SessionState::Uninitialized,
            reset_pending,
        })
    }

    /// Ensure the schema exists and start a fresh session, replacing any
    /// prior one. Pending work in a replaced session is discarded.
    pub async fn reload(&mut self) -> Result<()> {
        if self.reset_pending {
            self.engine.reset_schema().await?;
            self.reset_pending = false;
        }
        self.engine.ensure_schema(&self.registry).await?;

        if let SessionState::Active(session) = &self.state {
            if !session.is_empty() {
                tracing::debug!(
                    discarded = session.pending_len(),
                    "reload replacing a session with pending work"
                );
            }
        }
        self.state = SessionState::Active(Session::new());
        Ok(())
    }

    /// Every committed record of `kind`, or of all registered kinds, keyed
    /// by identity (`"<Kind>.<id>"`).
    ///
    /// Keys cannot collide across kinds because the kind tag is part of the
    /// key. The map carries no meaningful order.
    pub async fn all(&self, kind: Option<EntityKind>) -> Result<HashMap<String, Entity>> {
        self.require_active()?;
        let kinds = self.resolve_kinds(kind)?;

        let mut objects = HashMap::new();
        for kind in kinds {
            let rows = query::fetch_all(self.engine.pool(), kind)
                .await
                .map_err(StorageError::Query)?;
            for entity in rows {
                objects.insert(entity.storage_key(), entity);
            }
        }
        Ok(objects)
    }

    /// Stage a record for insertion. Nothing is written until [`save`].
    ///
    /// [`save`]: DbStorage::save
    pub fn add(&mut self, entity: impl Into<Entity>) -> Result<()> {
        let entity = entity.into();
        let session = match &mut self.state {
            SessionState::Active(session) => session,
            other => {
                return Err(StorageError::InvalidState {
                    state: other.name(),
                })
            }
        };
        session.stage_insert(&self.registry, entity)
    }

    /// Commit all pending work in one transaction.
    ///
    /// With nothing pending this is a no-op. The pending set is emptied
    /// before the transaction runs, so a failed commit leaves the session
    /// clean and nothing partially applied.
    pub async fn save(&mut self) -> Result<()> {
        let session = match &mut self.state {
            SessionState::Active(session) => session,
            other => {
                return Err(StorageError::InvalidState {
                    state: other.name(),
                })
            }
        };
        if session.is_empty() {
            return Ok(());
        }
        let (inserts, deletes) = session.take_pending();

        let mut tx = self
            .engine
            .pool()
            .begin()
            .await
            .map_err(StorageError::Commit)?;
        for entity in &inserts {
            query::insert(&mut tx, entity)
                .await
                .map_err(StorageError::Commit)?;
        }
        for entity in &deletes {
            query::delete(&mut tx, entity.kind(), entity.id())
                .await
                .map_err(StorageError::Commit)?;
        }
        tx.commit().await.map_err(StorageError::Commit)?;

        tracing::debug!(
            inserted = inserts.len(),
            deleted = deletes.len(),
            "unit of work committed"
        );
        Ok(())
    }

    /// Stage a record for removal and commit immediately, flushing any
    /// other pending work in the same transaction. `None` is a no-op.
    /// Deleting a record that was never committed is also a no-op.
    pub async fn delete(&mut self, entity: Option<Entity>) -> Result<()> {
        let session = match &mut self.state {
            SessionState::Active(session) => session,
            other => {
                return Err(StorageError::InvalidState {
                    state: other.name(),
                })
            }
        };
        let Some(entity) = entity else {
            return Ok(());
        };
        session.stage_delete(entity);
        self.save().await
    }

    /// Discard any uncommitted pending work and release the session.
    ///
    /// Staged-but-unsaved records are lost; call [`save`] first if they
    /// matter. The pool stays open, so a later [`reload`] starts over.
    ///
    /// [`save`]: DbStorage::save
    /// [`reload`]: DbStorage::reload
    pub fn close(&mut self) -> Result<()> {
        let session = match &self.state {
            SessionState::Active(session) => session,
            other => {
                return Err(StorageError::InvalidState {
                    state: other.name(),
                })
            }
        };
        if !session.is_empty() {
            tracing::debug!(
                discarded = session.pending_len(),
                "closing a session with uncommitted work"
            );
        }
        self.state = SessionState::Closed;
        Ok(())
    }

    /// One committed record by identity, if present.
    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        self.require_active()?;
        self.require_registered(kind)?;
        query::fetch_by_id(self.engine.pool(), kind, id)
            .await
            .map_err(StorageError::Query)
    }

    /// Number of committed records of `kind`, or across all registered
    /// kinds.
    pub async fn count(&self, kind: Option<EntityKind>) -> Result<u64> {
        self.require_active()?;
        let kinds = self.resolve_kinds(kind)?;

        let mut total = 0;
        for kind in kinds {
            total += query::count(self.engine.pool(), kind)
                .await
                .map_err(StorageError::Query)?;
        }
        Ok(total)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    fn require_active(&self) -> Result<()> {
        match &self.state {
            SessionState::Active(_) => Ok(()),
            other => Err(StorageError::InvalidState {
                state: other.name(),
            }),
        }
    }

    fn require_registered(&self, kind: EntityKind) -> Result<()> {
        if self.registry.contains(kind) {
            Ok(())
        } else {
            Err(StorageError::UnknownType(kind.to_string()))
        }
    }

    fn resolve_kinds(&self, kind: Option<EntityKind>) -> Result<Vec<EntityKind>> {
        match kind {
            Some(kind) => {
                self.require_registered(kind)?;
                Ok(vec![kind])
            }
            None => Ok(self.registry.kinds().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::User;

    use crate::config::Mode;

    fn lazy_storage() -> DbStorage {
        let config = StorageConfig::new("hearth", "hearth", "localhost", "hearth_dev");
        DbStorage::connect_lazy(config, EntityRegistry::full()).unwrap()
    }

    #[tokio::test]
    async fn add_requires_an_active_session() {
        let mut storage = lazy_storage();
        let err = storage.add(User::new("a@example.com", "pw")).unwrap_err();
        assert!(matches!(
            err,
            StorageError::InvalidState {
                state: "uninitialized"
            }
        ));
    }

    #[tokio::test]
    async fn close_requires_an_active_session() {
        let mut storage = lazy_storage();
        let err = storage.close().unwrap_err();
        assert!(matches!(err, StorageError::InvalidState { .. }));
        assert!(!storage.is_active());
    }

    #[tokio::test]
    async fn reads_require_an_active_session() {
        let storage = lazy_storage();
        assert!(matches!(
            storage.all(None).await.unwrap_err(),
            StorageError::InvalidState { .. }
        ));
        assert!(matches!(
            storage.get(EntityKind::User, "missing").await.unwrap_err(),
            StorageError::InvalidState { .. }
        ));
        assert!(matches!(
            storage.count(None).await.unwrap_err(),
            StorageError::InvalidState { .. }
        ));
    }

    #[tokio::test]
    async fn save_and_delete_require_an_active_session() {
        let mut storage = lazy_storage();
        assert!(matches!(
            storage.save().await.unwrap_err(),
            StorageError::InvalidState { .. }
        ));
        // The state check comes before the None short-circuit.
        assert!(matches!(
            storage.delete(None).await.unwrap_err(),
            StorageError::InvalidState { .. }
        ));
    }

    #[tokio::test]
    async fn lazy_test_mode_defers_the_destructive_reset() {
        let mut config = StorageConfig::new("hearth", "hearth", "localhost", "hearth_test");
        config.mode = Mode::Test;
        let storage = DbStorage::connect_lazy(config, EntityRegistry::full()).unwrap();
        assert!(storage.reset_pending);
    }

    #[tokio::test]
    async fn lazy_normal_mode_schedules_no_reset() {
        let storage = lazy_storage();
        assert!(!storage.reset_pending);
    }
}
