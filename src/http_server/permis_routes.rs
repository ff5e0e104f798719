//! Permis HTTP Routes
//!
//! CRUD endpoints under `/api/permis`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::permis::{parse_id, NewPermisRequest, Permis, PermisError, PermisPatch, PermisService};

/// Create permis routes
pub fn permis_routes(service: Arc<PermisService>) -> Router {
    Router::new()
        .route(
            "/api/permis",
            get(list_permis_handler).post(create_permis_handler),
        )
        .route(
            "/api/permis/:id",
            get(get_permis_handler)
                .put(update_permis_handler)
                .delete(delete_permis_handler),
        )
        .with_state(service)
}

async fn create_permis_handler(
    State(service): State<Arc<PermisService>>,
    payload: Result<Json<NewPermisRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Permis>), PermisError> {
    let Json(request) = payload?;
    let created = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_permis_handler(
    State(service): State<Arc<PermisService>>,
) -> Result<Json<Vec<Permis>>, PermisError> {
    Ok(Json(service.list().await?))
}

async fn get_permis_handler(
    State(service): State<Arc<PermisService>>,
    Path(id): Path<String>,
) -> Result<Json<Permis>, PermisError> {
    let id = parse_id(&id)?;
    Ok(Json(service.get(id).await?))
}

async fn update_permis_handler(
    State(service): State<Arc<PermisService>>,
    Path(id): Path<String>,
    payload: Result<Json<PermisPatch>, JsonRejection>,
) -> Result<Json<Permis>, PermisError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    Ok(Json(service.update(id, patch).await?))
}

async fn delete_permis_handler(
    State(service): State<Arc<PermisService>>,
    Path(id): Path<String>,
) -> Result<StatusCode, PermisError> {
    let id = parse_id(&id)?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
