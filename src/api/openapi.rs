use utoipa::openapi::{InfoBuilder, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

use super::handlers::{forests, health, trees};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI spec.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Add new endpoints here via `.routes(routes!(...))` so they are both
/// served and included in the generated `OpenAPI` spec.
pub(crate) fn api_router() -> OpenApiRouter {
    // `routes!` reads #[utoipa::path] to bind HTTP method + path and add the
    // route to OpenAPI; handlers sharing a path go in one call.
    let mut tree_tag = Tag::new("tree");
    tree_tag.description = Some("Tree inventory".to_string());

    let mut forest_tag = Tag::new("forest");
    forest_tag.description = Some("Forests, membership and ecological metrics".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service health".to_string());

    let mut base = cargo_openapi();
    base.tags = Some(vec![tree_tag, forest_tag, health_tag]);

    OpenApiRouter::with_openapi(base)
        .routes(routes!(health::health))
        .routes(routes!(trees::list_trees, trees::create_tree))
        .routes(routes!(trees::get_tree, trees::update_tree, trees::delete_tree))
        .routes(routes!(forests::list_forests, forests::create_forest))
        .routes(routes!(
            forests::get_forest,
            forests::update_forest,
            forests::delete_forest
        ))
        .routes(routes!(forests::add_tree_to_forest))
        .routes(routes!(forests::forest_species))
        .routes(routes!(forests::forest_absorption))
        .routes(routes!(forests::forest_surface_needed))
        .routes(routes!(forests::forest_cars_equivalent))
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    // Use Cargo.toml metadata instead of the utoipa-axum crate info defaults.
    let info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    OpenApiBuilder::new().info(info).build()
}
