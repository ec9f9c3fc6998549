//! End-to-end router tests.
//!
//! These exercise the Axum router against fresh in-memory repositories, one
//! router per test, covering the HTTP status mapping and the headline
//! domain scenarios.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use silva::api;
use silva::domain::repository::{ForestRepository, TreeRepository};
use silva::domain::{ForestService, TreeService};
use silva::storage::memory::{MemoryForestRepository, MemoryTreeRepository};

fn app() -> Router {
    let trees: Arc<dyn TreeRepository> = Arc::new(MemoryTreeRepository::new());
    let forests: Arc<dyn ForestRepository> = Arc::new(MemoryForestRepository::new());
    let tree_service = Arc::new(TreeService::new(Arc::clone(&trees)));
    let forest_service = Arc::new(ForestService::new(forests, trees));
    api::app(tree_service, forest_service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

fn tree_payload(species: &str, capacity: f64) -> Value {
    json!({
        "birth": "2015-04-10T00:00:00Z",
        "species": species,
        "exposure": "SUN",
        "carbonStorageCapacity": capacity,
    })
}

async fn create_tree(app: &Router, species: &str, capacity: f64) -> String {
    let (status, body) = send(app, "POST", "/tree", Some(tree_payload(species, capacity))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("tree id").to_string()
}

async fn create_forest(app: &Router, surface: f64, tree_ids: &[&str]) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/forest",
        Some(json!({
            "type": "TEMPERATE",
            "surface": surface,
            "treeIds": tree_ids,
        })),
    )
    .await
}

#[tokio::test]
async fn tree_crud_round_trip() {
    let app = app();

    let id = create_tree(&app, "OAK", 4.2).await;

    let (status, body) = send(&app, "GET", &format!("/tree/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["species"], "OAK");
    assert_eq!(body["carbonStorageCapacity"], 4.2);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/tree/{id}"),
        Some(tree_payload("PINE", 1.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["species"], "PINE");

    let (status, body) = send(&app, "GET", "/tree", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/tree/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/tree/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tree_without_birth_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/tree",
        Some(json!({
            "species": "OAK",
            "exposure": "SHADOW",
            "carbonStorageCapacity": 2.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["title"], "Validation Error");
}

#[tokio::test]
async fn unknown_tree_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        "GET",
        "/tree/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn forest_metrics_follow_the_diversity_formula() {
    let app = app();
    let oak = create_tree(&app, "OAK", 10.0).await;
    let ash = create_tree(&app, "ASH", 20.0).await;

    let (status, forest) = create_forest(&app, 100.0, &[&oak, &ash]).await;
    assert_eq!(status, StatusCode::CREATED);
    let forest_id = forest["id"].as_str().expect("forest id");

    let (status, body) = send(&app, "GET", &format!("/forest/{forest_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trees"].as_array().expect("trees").len(), 2);
    assert_eq!(body["type"], "TEMPERATE");

    // 30 base * 1.10 diversity for 2 species.
    let (status, body) = send(&app, "GET", &format!("/forest/{forest_id}/absorption"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["absorption"].as_f64().expect("absorption") - 33.0).abs() < 1e-9);

    // 0.33 per unit surface, target 66 => 200.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/forest/{forest_id}/surface-needed?targetCo2=66"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["surfaceNeeded"].as_f64().expect("surfaceNeeded") - 200.0).abs() < 1e-9);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/forest/{forest_id}/cars-equivalent"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["cars"].as_f64().expect("cars") - 0.0165).abs() < 1e-9);

    let (status, body) = send(&app, "GET", &format!("/forest/{forest_id}/species"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["OAK", "ASH"]));
}

#[tokio::test]
async fn owned_tree_conflicts_except_for_its_own_forest() {
    let app = app();
    let oak = create_tree(&app, "OAK", 10.0).await;

    let (status, forest) = create_forest(&app, 50.0, &[&oak]).await;
    assert_eq!(status, StatusCode::CREATED);
    let forest_id = forest["id"].as_str().expect("forest id").to_string();

    // Another forest claiming the same tree conflicts.
    let (status, body) = create_forest(&app, 60.0, &[&oak]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let detail = body["detail"].as_str().expect("detail");
    assert!(detail.contains(&oak));
    assert!(detail.contains(&forest_id));

    // The owner re-submitting its own list does not.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/forest/{forest_id}"),
        Some(json!({ "type": "TEMPERATE", "surface": 75.0, "treeIds": [oak] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn forest_with_unknown_tree_is_rejected_and_not_persisted() {
    let app = app();

    let (status, body) =
        create_forest(&app, 50.0, &["5d3f0d62-5f9c-4f9e-9d8a-b6a1f6f9f0aa"]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"]
        .as_str()
        .expect("detail")
        .contains("5d3f0d62-5f9c-4f9e-9d8a-b6a1f6f9f0aa"));

    let (status, body) = send(&app, "GET", "/forest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn non_positive_surface_is_rejected() {
    let app = app();
    let (status, body) = create_forest(&app, 0.0, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Validation Error");
}

#[tokio::test]
async fn adding_a_tree_twice_is_a_no_op() {
    let app = app();
    let oak = create_tree(&app, "OAK", 10.0).await;

    let (status, forest) = create_forest(&app, 50.0, &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    let forest_id = forest["id"].as_str().expect("forest id");

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/forest/{forest_id}/trees"),
            Some(json!({ "treeId": oak })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Tree added");
    }

    let (status, body) = send(&app, "GET", &format!("/forest/{forest_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trees"].as_array().expect("trees").len(), 1);
}

#[tokio::test]
async fn surface_needed_requires_a_populated_forest() {
    let app = app();
    let (status, forest) = create_forest(&app, 50.0, &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    let forest_id = forest["id"].as_str().expect("forest id");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/forest/{forest_id}/surface-needed?targetCo2=10"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Validation Error");
}

#[tokio::test]
async fn forest_delete_reports_missing_records() {
    let app = app();
    let (status, forest) = create_forest(&app, 50.0, &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    let forest_id = forest["id"].as_str().expect("forest id");

    let (status, _) = send(&app, "DELETE", &format!("/forest/{forest_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/forest/{forest_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_species_is_rejected_by_request_parsing() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/tree",
        Some(json!({
            "birth": "2015-04-10T00:00:00Z",
            "species": "BAOBAB",
            "exposure": "SUN",
            "carbonStorageCapacity": 1.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "silva");
}
