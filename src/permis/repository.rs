//! Storage seam for license records.

use async_trait::async_trait;

use super::model::{NewPermis, Permis, PermisPatch};

/// Result type for storage calls
pub type StorageResult<T> = Result<T, sqlx::Error>;

/// Storage operations backing the record service.
///
/// Each call is a single statement against the store; implementations do
/// not retry.
#[async_trait]
pub trait PermisRepository: Send + Sync {
    /// Insert a record and return it with its generated id
    async fn insert(&self, permis: NewPermis) -> StorageResult<Permis>;

    /// All stored records, ascending by id
    async fn find_all(&self) -> StorageResult<Vec<Permis>>;

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Permis>>;

    /// Merge `patch` into the stored record in one atomic step.
    ///
    /// Returns `None` if no record has this id.
    async fn update(&self, id: i32, patch: PermisPatch) -> StorageResult<Option<Permis>>;

    /// Remove the record, returning the deleted row if one matched
    async fn delete(&self, id: i32) -> StorageResult<Option<Permis>>;

    /// Cheap round-trip used by `permis check`
    async fn ping(&self) -> StorageResult<()>;
}
