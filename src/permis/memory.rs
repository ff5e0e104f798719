//! In-process repository.
//!
//! Backs the HTTP tests and `permis serve --in-memory`. Ids are assigned
//! sequentially from 1 and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{NewPermis, Permis, PermisPatch};
use super::repository::{PermisRepository, StorageResult};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Permis>,
}

#[derive(Default)]
pub struct InMemoryPermisRepository {
    table: RwLock<Table>,
}

impl InMemoryPermisRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermisRepository for InMemoryPermisRepository {
    async fn insert(&self, permis: NewPermis) -> StorageResult<Permis> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| sqlx::Error::Protocol("permis id sequence exhausted".to_string()))?;
        table.last_id = id;
        let stored = permis.with_id(id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> StorageResult<Vec<Permis>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Permis>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, patch: PermisPatch) -> StorageResult<Option<Permis>> {
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.remove(&id) else {
            return Ok(None);
        };
        let merged = existing.merge(patch);
        table.rows.insert(id, merged.clone());
        Ok(Some(merged))
    }

    async fn delete(&self, id: i32) -> StorageResult<Option<Permis>> {
        Ok(self.table.write().await.rows.remove(&id))
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
