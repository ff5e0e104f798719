//! # Record Service
//!
//! The five license-record operations. Validation happens here; storage
//! failures are logged with operation context and returned as
//! [`PermisError::Storage`].

use std::sync::Arc;

use tracing::{debug, error, info};

use super::errors::{PermisError, PermisResult};
use super::model::{NewPermisRequest, Permis, PermisPatch};
use super::repository::PermisRepository;

pub struct PermisService {
    repository: Arc<dyn PermisRepository>,
}

impl PermisService {
    pub fn new(repository: Arc<dyn PermisRepository>) -> Self {
        Self { repository }
    }

    /// Validate and insert a new record
    pub async fn create(&self, request: NewPermisRequest) -> PermisResult<Permis> {
        let permis = request.validate()?;

        let created = self
            .repository
            .insert(permis)
            .await
            .map_err(storage_failure("create", None))?;

        info!(id = created.id, "permis created");
        Ok(created)
    }

    pub async fn list(&self) -> PermisResult<Vec<Permis>> {
        let all = self
            .repository
            .find_all()
            .await
            .map_err(storage_failure("list", None))?;

        debug!(count = all.len(), "permis listed");
        Ok(all)
    }

    pub async fn get(&self, id: i32) -> PermisResult<Permis> {
        ensure_positive(id)?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_failure("get", Some(id)))?
            .ok_or(PermisError::NotFound(id))
    }

    /// Apply a partial update.
    ///
    /// The record must exist beforehand. If it disappears between that
    /// check and the update statement, the update matches nothing and the
    /// caller also gets `NotFound`.
    pub async fn update(&self, id: i32, patch: PermisPatch) -> PermisResult<Permis> {
        ensure_positive(id)?;
        patch.validate()?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_failure("update", Some(id)))?
            .ok_or(PermisError::NotFound(id))?;

        if patch.is_empty() {
            debug!(id, "empty patch");
        }

        let updated = self
            .repository
            .update(id, patch)
            .await
            .map_err(storage_failure("update", Some(id)))?
            .ok_or(PermisError::NotFound(id))?;

        info!(id, "permis updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> PermisResult<()> {
        ensure_positive(id)?;

        self.repository
            .delete(id)
            .await
            .map_err(storage_failure("delete", Some(id)))?
            .ok_or(PermisError::NotFound(id))?;

        info!(id, "permis deleted");
        Ok(())
    }

    /// Round-trip to the store
    pub async fn ping(&self) -> PermisResult<()> {
        self.repository
            .ping()
            .await
            .map_err(storage_failure("ping", None))
    }
}

fn ensure_positive(id: i32) -> PermisResult<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(PermisError::invalid_id())
    }
}

fn storage_failure(
    operation: &'static str,
    id: Option<i32>,
) -> impl FnOnce(sqlx::Error) -> PermisError {
    move |e| {
        error!(operation, id, error = %e, "storage failure");
        PermisError::Storage(e)
    }
}
