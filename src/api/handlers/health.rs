use axum::{
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::GIT_COMMIT_HASH;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    name: String,
    version: String,
    commit: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service identity and build info.", body = Health),
    ),
    tag = "health"
)]
pub async fn health() -> impl IntoResponse {
    let health = Health {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: GIT_COMMIT_HASH.to_string(),
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = format!("{}:{}:{}", health.name, health.version, short_hash).parse() {
        debug!("X-App header: {:?}", value);
        headers.insert("X-App", value);
    }

    (headers, Json(health))
}
