//! HTTP surface: router assembly and server startup.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{ForestService, TreeService};
use crate::storage::memory::{MemoryForestRepository, MemoryTreeRepository};

pub mod error;
pub(crate) mod handlers;
mod openapi;

pub use openapi::openapi;

/// Build the application router: documented API routes, Swagger UI at
/// `/docs`, request-id + trace layers, and the domain services as
/// extensions.
pub fn app(tree_service: Arc<TreeService>, forest_service: Arc<ForestService>) -> Router {
    let (router, api_doc) = openapi::api_router().split_for_parts();

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api_doc))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(tree_service))
                .layer(Extension(forest_service)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to bind or serve
pub async fn new(port: u16) -> Result<()> {
    let trees: Arc<dyn crate::domain::repository::TreeRepository> =
        Arc::new(MemoryTreeRepository::new());
    let forests: Arc<dyn crate::domain::repository::ForestRepository> =
        Arc::new(MemoryForestRepository::new());

    let tree_service = Arc::new(TreeService::new(Arc::clone(&trees)));
    let forest_service = Arc::new(ForestService::new(forests, trees));

    let app = app(tree_service, forest_service);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
