//! List API handlers.

use axum::extract::{Path, State};
use axum::Json;

use punchcard_core::registry::TypeRegistry;
use punchcard_types::listing::{FormattedItem, ListEnvelope, SingleItem, TypeSummary};

use crate::http::error::AppError;
use crate::http::extractors::query::ListQuery;
use crate::state::AppState;

/// GET /api - Paginated listing of every registered content type.
pub async fn all(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> Result<Json<ListEnvelope<TypeSummary>>, AppError> {
    Ok(Json(state.content_service.all(&params).await?))
}

/// GET /api/types - Content-type listing over the registry's types.
pub async fn content(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> Result<Json<ListEnvelope<TypeSummary>>, AppError> {
    let types = state.content_service.types();
    Ok(Json(state.content_service.content(&params, &types).await?))
}

/// GET /api/types/{type_slug} - One page of records of a content type.
pub async fn of_type(
    State(state): State<AppState>,
    Path(type_slug): Path<String>,
    ListQuery(params): ListQuery,
) -> Result<Json<ListEnvelope<FormattedItem>>, AppError> {
    Ok(Json(state.content_service.of_type(&params, &type_slug).await?))
}

/// GET /api/types/{type_slug}/{id} - A single record, or `{}`.
pub async fn one(
    State(state): State<AppState>,
    Path((type_slug, id)): Path<(String, String)>,
    ListQuery(params): ListQuery,
) -> Result<Json<SingleItem>, AppError> {
    let service = &state.content_service;
    let registered = service.registry().get(&type_slug);
    let defs = registered.map(|ty| ty.attributes.as_slice());

    let item = service.one(&params, &id, defs).await?;

    // A record only lives under its own type's URL. Rows stored under a
    // slugified display name still match their registered type by name.
    let under_path = |slug: &str, name: &str| {
        slug == type_slug || registered.is_some_and(|ty| ty.name == name)
    };
    if item.0.as_ref().is_some_and(|d| !under_path(&d.type_slug, &d.type_name)) {
        return Ok(Json(SingleItem::empty()));
    }

    Ok(Json(item))
}
