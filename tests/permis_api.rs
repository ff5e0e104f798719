//! End-to-end API tests over the assembled router.
//!
//! Runs against the in-memory repository so no database is needed.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use permis_service::http_server::{HttpServer, HttpServerConfig};
use permis_service::permis::{InMemoryPermisRepository, PermisService};

fn app() -> Router {
    let service = PermisService::new(Arc::new(InMemoryPermisRepository::new()));
    HttpServer::new(HttpServerConfig::default(), Arc::new(service)).router()
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        (status, Value::Null)
    } else {
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

fn diallo() -> Value {
    json!({
        "nom": "Diallo",
        "prenom": "Awa",
        "datenaissance": "1990-01-01",
        "numeropermis": "A123",
        "dateobtention": "2010-01-01",
        "dateexpiration": "2030-01-01",
        "categorie": "B"
    })
}

#[tokio::test]
async fn test_create_update_delete_scenario() {
    let app = app();

    let (status, created) = call(&app, Method::POST, "/api/permis", Some(diallo())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["statut"], "active");
    let id = created["id"].as_i64().expect("integer id");
    let uri = format!("/api/permis/{}", id);

    let (status, updated) = call(&app, Method::PUT, &uri, Some(json!({ "residence": "Dakar" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["residence"], "Dakar");

    let mut expected = created.clone();
    expected["residence"] = json!("Dakar");
    assert_eq!(updated, expected);

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_created_record_echoes_input() {
    let app = app();
    let mut payload = diallo();
    payload["lieunaissance"] = json!("Saint-Louis");
    payload["mention"] = json!("verres correcteurs");
    payload["statut"] = json!("suspendu");

    let (status, created) = call(&app, Method::POST, "/api/permis", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    for (key, value) in payload.as_object().unwrap() {
        assert_eq!(&created[key], value, "field {}", key);
    }

    let (status, fetched) = call(
        &app,
        Method::GET,
        &format!("/api/permis/{}", created["id"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_subset_leaves_other_fields() {
    let app = app();
    let (_, created) = call(&app, Method::POST, "/api/permis", Some(diallo())).await;
    let uri = format!("/api/permis/{}", created["id"]);

    let patch = json!({
        "categorie": "C",
        "dateexpiration": "2035-06-30",
        "nom": null
    });
    let (status, updated) = call(&app, Method::PUT, &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = created.clone();
    expected["categorie"] = json!("C");
    expected["dateexpiration"] = json!("2035-06-30");
    assert_eq!(updated, expected);

    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn test_each_required_field_is_enforced() {
    let required = [
        "nom",
        "prenom",
        "datenaissance",
        "numeropermis",
        "dateobtention",
        "dateexpiration",
        "categorie",
    ];
    let app = app();

    for field in required {
        let mut payload = diallo();
        payload.as_object_mut().unwrap().remove(field);
        let (status, body) = call(&app, Method::POST, "/api/permis", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert!(body["error"].as_str().unwrap().contains(field));

        let mut payload = diallo();
        payload[field] = json!("");
        let (status, _) = call(&app, Method::POST, "/api/permis", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "empty {}", field);
    }

    let (_, list) = call(&app, Method::GET, "/api/permis", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
