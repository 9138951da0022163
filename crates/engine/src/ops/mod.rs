use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::{
    ResultEngine,
    ledger::Snapshot,
    store::{DatabaseRepository, MemoryRepository, Repository},
};

mod expenses;
mod participants;
mod report;
mod restore;
mod settings;

/// Async service over a [`Repository`].
///
/// Reads load a fresh snapshot. Writes load, apply a [`Snapshot`] operation
/// and save, one at a time: the write lock makes every read-modify-write
/// cycle atomic with respect to other writers of this engine.
#[derive(Debug)]
pub struct Engine {
    store: Arc<dyn Repository>,
    write_lock: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Current snapshot of the group.
    pub async fn snapshot(&self) -> ResultEngine<Snapshot> {
        self.store.load().await
    }

    /// Replace the whole stored group, e.g. when importing a backup.
    pub async fn replace_snapshot(&self, snapshot: Snapshot) -> ResultEngine<()> {
        self.mutate(|current| {
            *current = snapshot;
            Ok(())
        })
        .await
    }

    /// Run `apply` on the stored snapshot and persist the result.
    ///
    /// Nothing is saved when `apply` fails.
    async fn mutate<T: Send>(
        &self,
        apply: impl FnOnce(&mut Snapshot) -> ResultEngine<T> + Send,
    ) -> ResultEngine<T> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.store.load().await?;
        let value = apply(&mut snapshot)?;
        self.store.save(&snapshot).await?;
        tracing::debug!(
            participants = snapshot.participants.len(),
            expenses = snapshot.expenses.len(),
            "group saved"
        );
        Ok(value)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn Repository>>,
}

impl EngineBuilder {
    /// Use a custom repository.
    pub fn repository(mut self, store: Arc<dyn Repository>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Store data in a migrated sea-orm database.
    pub fn database(self, db: DatabaseConnection) -> EngineBuilder {
        self.repository(Arc::new(DatabaseRepository::new(db)))
    }

    /// Construct `Engine`. Without a repository data lives in memory.
    pub fn build(self) -> Engine {
        Engine {
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryRepository::default())),
            write_lock: Mutex::new(()),
        }
    }
}
