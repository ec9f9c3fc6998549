//! Tree CRUD handlers - thin layer delegating to the tree domain service.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::error::{map_domain_error, Problem};
use crate::domain::model::{Tree, TreeDraft};
use crate::domain::TreeService;

#[utoipa::path(
    get,
    path = "/tree",
    responses(
        (status = 200, description = "All trees in the inventory.", body = [Tree]),
    ),
    tag = "tree"
)]
pub async fn list_trees(service: Extension<Arc<TreeService>>) -> Result<Json<Vec<Tree>>, Problem> {
    let trees = service.list().map_err(map_domain_error)?;
    Ok(Json(trees))
}

#[utoipa::path(
    post,
    path = "/tree",
    request_body = TreeDraft,
    responses(
        (status = 201, description = "Tree created.", body = Tree),
        (status = 400, description = "Missing birth date.", body = Problem),
    ),
    tag = "tree"
)]
pub async fn create_tree(
    service: Extension<Arc<TreeService>>,
    Json(draft): Json<TreeDraft>,
) -> Result<(StatusCode, Json<Tree>), Problem> {
    let tree = service.save(draft).map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(tree)))
}

#[utoipa::path(
    get,
    path = "/tree/{id}",
    params(("id" = Uuid, Path, description = "Tree id")),
    responses(
        (status = 200, description = "The tree.", body = Tree),
        (status = 404, description = "Tree not found.", body = Problem),
    ),
    tag = "tree"
)]
pub async fn get_tree(
    service: Extension<Arc<TreeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tree>, Problem> {
    let tree = service.get(id).map_err(map_domain_error)?;
    Ok(Json(tree))
}

#[utoipa::path(
    put,
    path = "/tree/{id}",
    request_body = TreeDraft,
    params(("id" = Uuid, Path, description = "Tree id")),
    responses(
        (status = 200, description = "Tree replaced.", body = Tree),
        (status = 400, description = "Missing birth date.", body = Problem),
        (status = 404, description = "Tree not found.", body = Problem),
    ),
    tag = "tree"
)]
pub async fn update_tree(
    service: Extension<Arc<TreeService>>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TreeDraft>,
) -> Result<Json<Tree>, Problem> {
    let tree = service.update(id, draft).map_err(map_domain_error)?;
    Ok(Json(tree))
}

#[utoipa::path(
    delete,
    path = "/tree/{id}",
    params(("id" = Uuid, Path, description = "Tree id")),
    responses(
        (status = 204, description = "Tree removed."),
        (status = 404, description = "Tree not found.", body = Problem),
    ),
    tag = "tree"
)]
pub async fn delete_tree(
    service: Extension<Arc<TreeService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    if service.delete(id).map_err(map_domain_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Problem::new(StatusCode::NOT_FOUND, "Not Found")
            .with_detail(format!("tree with id '{id}' was not found")))
    }
}
