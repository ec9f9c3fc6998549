//! Forest handlers: CRUD, membership and ecological metrics.
//!
//! Metric endpoints resolve the forest and its trees through the domain
//! service, then delegate the arithmetic to [`crate::domain::co2`].

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::error::{map_domain_error, Problem};
use crate::domain::co2;
use crate::domain::model::{Forest, ForestDraft, ForestWithTrees, Species};
use crate::domain::ForestService;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTreeRequest {
    pub tree_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AbsorptionResponse {
    /// Tonnes of CO2 absorbed per year, diversity bonus included.
    absorption: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SurfaceNeededQuery {
    /// Target CO2 absorption, tonnes per year.
    pub target_co2: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceNeededResponse {
    surface_needed: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarsEquivalentResponse {
    /// Average cars whose yearly emissions this forest absorbs.
    cars: f64,
}

#[utoipa::path(
    get,
    path = "/forest",
    responses(
        (status = 200, description = "All forests with their trees resolved.", body = [ForestWithTrees]),
    ),
    tag = "forest"
)]
pub async fn list_forests(
    service: Extension<Arc<ForestService>>,
) -> Result<Json<Vec<ForestWithTrees>>, Problem> {
    let forests = service.list().map_err(map_domain_error)?;
    Ok(Json(forests))
}

#[utoipa::path(
    post,
    path = "/forest",
    request_body = ForestDraft,
    responses(
        (status = 201, description = "Forest created.", body = Forest),
        (status = 400, description = "Non-positive surface.", body = Problem),
        (status = 404, description = "A referenced tree does not exist.", body = Problem),
        (status = 409, description = "A referenced tree is owned by another forest.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn create_forest(
    service: Extension<Arc<ForestService>>,
    Json(draft): Json<ForestDraft>,
) -> Result<(StatusCode, Json<Forest>), Problem> {
    let forest = service.save(draft).map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(forest)))
}

#[utoipa::path(
    get,
    path = "/forest/{id}",
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 200, description = "The forest with its trees resolved.", body = ForestWithTrees),
        (status = 404, description = "Forest not found.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn get_forest(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ForestWithTrees>, Problem> {
    let forest = service.get_with_trees(id).map_err(map_domain_error)?;
    Ok(Json(forest))
}

#[utoipa::path(
    put,
    path = "/forest/{id}",
    request_body = ForestDraft,
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 200, description = "Forest replaced.", body = Forest),
        (status = 400, description = "Non-positive surface.", body = Problem),
        (status = 404, description = "Forest or referenced tree not found.", body = Problem),
        (status = 409, description = "A referenced tree is owned by another forest.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn update_forest(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ForestDraft>,
) -> Result<Json<Forest>, Problem> {
    let forest = service.update(id, draft).map_err(map_domain_error)?;
    Ok(Json(forest))
}

#[utoipa::path(
    delete,
    path = "/forest/{id}",
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 204, description = "Forest removed."),
        (status = 404, description = "Forest not found.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn delete_forest(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    if service.delete(id).map_err(map_domain_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Problem::new(StatusCode::NOT_FOUND, "Not Found")
            .with_detail(format!("forest with id '{id}' was not found")))
    }
}

#[utoipa::path(
    post,
    path = "/forest/{id}/trees",
    request_body = AddTreeRequest,
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 200, description = "Tree added (or already a member).", body = MessageResponse),
        (status = 404, description = "Forest or tree not found.", body = Problem),
        (status = 409, description = "Tree is owned by another forest.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn add_tree_to_forest(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddTreeRequest>,
) -> Result<Json<MessageResponse>, Problem> {
    service
        .add_tree(id, payload.tree_id)
        .map_err(map_domain_error)?;
    Ok(Json(MessageResponse {
        message: "Tree added".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/forest/{id}/species",
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 200, description = "Distinct species present in the forest.", body = [Species]),
        (status = 404, description = "Forest not found.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn forest_species(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Species>>, Problem> {
    let species = service.species(id).map_err(map_domain_error)?;
    Ok(Json(species))
}

#[utoipa::path(
    get,
    path = "/forest/{id}/absorption",
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 200, description = "Yearly CO2 absorption of the forest.", body = AbsorptionResponse),
        (status = 404, description = "Forest not found.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn forest_absorption(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AbsorptionResponse>, Problem> {
    let forest = service.get(id).map_err(map_domain_error)?;
    let trees = service.trees_of(id).map_err(map_domain_error)?;
    Ok(Json(AbsorptionResponse {
        absorption: co2::absorption(&forest, &trees),
    }))
}

#[utoipa::path(
    get,
    path = "/forest/{id}/surface-needed",
    params(("id" = Uuid, Path, description = "Forest id"), SurfaceNeededQuery),
    responses(
        (status = 200, description = "Surface needed to absorb the target CO2.", body = SurfaceNeededResponse),
        (status = 400, description = "Empty forest or invalid target.", body = Problem),
        (status = 404, description = "Forest not found.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn forest_surface_needed(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<SurfaceNeededQuery>,
) -> Result<Json<SurfaceNeededResponse>, Problem> {
    let forest = service.get(id).map_err(map_domain_error)?;
    let trees = service.trees_of(id).map_err(map_domain_error)?;
    let surface_needed =
        co2::surface_needed(&forest, &trees, query.target_co2).map_err(map_domain_error)?;
    Ok(Json(SurfaceNeededResponse { surface_needed }))
}

#[utoipa::path(
    get,
    path = "/forest/{id}/cars-equivalent",
    params(("id" = Uuid, Path, description = "Forest id")),
    responses(
        (status = 200, description = "Car-emission equivalence of the forest's absorption.", body = CarsEquivalentResponse),
        (status = 404, description = "Forest not found.", body = Problem),
    ),
    tag = "forest"
)]
pub async fn forest_cars_equivalent(
    service: Extension<Arc<ForestService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarsEquivalentResponse>, Problem> {
    let forest = service.get(id).map_err(map_domain_error)?;
    let trees = service.trees_of(id).map_err(map_domain_error)?;
    Ok(Json(CarsEquivalentResponse {
        cars: co2::equivalent_in_cars(&forest, &trees),
    }))
}
