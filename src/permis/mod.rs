//! # Permis Records
//!
//! Driving-license records: model, validation, storage, and the record
//! service used by the HTTP layer.

pub mod errors;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod repository;
pub mod service;

pub use errors::{ErrorResponse, PermisError, PermisResult};
pub use memory::InMemoryPermisRepository;
pub use model::{parse_id, NewPermis, NewPermisRequest, Permis, PermisPatch, DEFAULT_STATUS};
pub use postgres::PgPermisRepository;
pub use repository::{PermisRepository, StorageResult};
pub use service::PermisService;
