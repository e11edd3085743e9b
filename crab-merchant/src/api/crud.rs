//! Generic resource handlers
//!
//! Every resource is served by the same five handlers, instantiated per
//! [`Resource`] in [`super::resource_routes`].

use axum::Json;
use axum::extract::{Extension, Path, State};
use http::StatusCode;
use shared::Paginated;
use shared::request::{QueryMap, parse_record_id};

use super::extract::{Payload, QueryParams};
use crate::auth::Caller;
use crate::crud::Resource;
use crate::error::ServiceResult;
use crate::state::AppState;

/// POST /api/{resource} - create
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Payload(input): Payload<R::Create>,
) -> ServiceResult<(StatusCode, Json<R::Response>)> {
    let created = state.service::<R>().create(caller.merchant_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/{resource} - filtered, sorted page
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    QueryParams(query): QueryParams<QueryMap>,
) -> ServiceResult<Json<Paginated<R::Response>>> {
    let page = state.service::<R>().find_all(caller.merchant_id, query).await?;
    Ok(Json(page))
}

/// GET /api/{resource}/{id} - single active record
pub async fn find_one<R: Resource>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ServiceResult<Json<R::Response>> {
    let id = parse_record_id(&id)?;
    let found = state.service::<R>().find_one(caller.merchant_id, id).await?;
    Ok(Json(found))
}

/// PUT /api/{resource}/{id} - partial update
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Payload(patch): Payload<R::Update>,
) -> ServiceResult<Json<R::Response>> {
    let id = parse_record_id(&id)?;
    let updated = state
        .service::<R>()
        .update(caller.merchant_id, id, patch)
        .await?;
    Ok(Json(updated))
}

/// DELETE /api/{resource}/{id} - logical delete
pub async fn remove<R: Resource>(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ServiceResult<Json<R::Response>> {
    let id = parse_record_id(&id)?;
    let removed = state.service::<R>().remove(caller.merchant_id, id).await?;
    Ok(Json(removed))
}
