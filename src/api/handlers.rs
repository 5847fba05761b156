use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use sqlx::PgPool;
use tracing::Instrument;

use super::error::{ApiPath, AppError};
use super::response::{ItemResponse, ItemsResponse, StatusResponse};
use crate::db::repository;
use crate::domain::{EntityKind, Model, Route, Station};

fn parse_kind(entity: &str) -> Result<EntityKind, AppError> {
    EntityKind::from_path_segment(entity).ok_or_else(|| AppError::bad_request("wrong entity"))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() {
        return Err(AppError::bad_request("request param id is required"));
    }
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request(format!("invalid id: {}", raw)))
}

fn decode<M: Model>(body: &[u8]) -> Result<M, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(format!("invalid request body: {}", e)))
}

/// Trims the name in place and rejects blank names. Updates also need an id.
fn normalize<M: Model>(item: &mut M, require_id: bool) -> Result<(), AppError> {
    let name = item.name().trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    item.set_name(name);

    if require_id && item.id() <= 0 {
        return Err(AppError::bad_request("id must be a positive integer"));
    }

    Ok(())
}

fn items_response<T: Serialize>(items: Vec<T>) -> Response {
    Json(ItemsResponse::ok(items)).into_response()
}

fn item_response<T: Serialize>(item: T) -> Response {
    Json(ItemResponse::ok(item)).into_response()
}

async fn create<M: Model>(pool: &PgPool, body: &[u8]) -> Result<Response, AppError> {
    let mut item: M = decode(body)?;
    normalize(&mut item, false)?;

    repository::create(pool, &mut item).await?;

    tracing::info!(id = item.id(), "done ok");
    Ok((StatusCode::CREATED, Json(ItemResponse::ok(item))).into_response())
}

async fn update<M: Model>(pool: &PgPool, body: &[u8]) -> Result<Response, AppError> {
    let mut item: M = decode(body)?;
    normalize(&mut item, true)?;

    repository::update(pool, &item).await?;

    tracing::info!(id = item.id(), "done ok");
    Ok(Json(StatusResponse::ok()).into_response())
}

async fn delete<M: Model>(pool: &PgPool, id: i64) -> Result<Response, AppError> {
    let mut item = M::default();
    item.set_id(id);

    repository::delete(pool, &item).await?;

    tracing::info!("done ok");
    Ok(Json(StatusResponse::ok()).into_response())
}

// ハンドラー: GET /api/:entity
pub async fn list_entities(
    State(pool): State<PgPool>,
    ApiPath(entity): ApiPath<String>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&entity)?;
    let span = tracing::info_span!("handlers.list", entity = %kind);

    async move {
        let response = match kind {
            EntityKind::Route => items_response(repository::list_routes(&pool).await?),
            EntityKind::Station => items_response(repository::list_stations(&pool).await?),
        };
        tracing::info!("done ok");
        Ok::<_, AppError>(response)
    }
    .instrument(span)
    .await
}

// ハンドラー: GET /api/:entity/:id
pub async fn get_entity(
    State(pool): State<PgPool>,
    ApiPath((entity, id)): ApiPath<(String, String)>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&entity)?;
    let id = parse_id(&id)?;
    let span = tracing::info_span!("handlers.get", entity = %kind, id);

    async move {
        let response = match kind {
            EntityKind::Route => item_response(repository::find_route_by_id(&pool, id).await?),
            EntityKind::Station => {
                item_response(repository::find_station_by_id(&pool, id).await?)
            }
        };
        tracing::info!("done ok");
        Ok::<_, AppError>(response)
    }
    .instrument(span)
    .await
}

// ハンドラー: POST /api/:entity
pub async fn create_entity(
    State(pool): State<PgPool>,
    ApiPath(entity): ApiPath<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&entity)?;
    let body = body?;
    let span = tracing::info_span!("handlers.create", entity = %kind);

    match kind {
        EntityKind::Route => create::<Route>(&pool, &body).instrument(span).await,
        EntityKind::Station => create::<Station>(&pool, &body).instrument(span).await,
    }
}

// ハンドラー: PUT /api/:entity
pub async fn update_entity(
    State(pool): State<PgPool>,
    ApiPath(entity): ApiPath<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&entity)?;
    let body = body?;
    let span = tracing::info_span!("handlers.update", entity = %kind);

    match kind {
        EntityKind::Route => update::<Route>(&pool, &body).instrument(span).await,
        EntityKind::Station => update::<Station>(&pool, &body).instrument(span).await,
    }
}

// ハンドラー: DELETE /api/:entity/:id
pub async fn delete_entity(
    State(pool): State<PgPool>,
    ApiPath((entity, id)): ApiPath<(String, String)>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&entity)?;
    let id = parse_id(&id)?;
    let span = tracing::info_span!("handlers.delete", entity = %kind, id);

    match kind {
        EntityKind::Route => delete::<Route>(&pool, id).instrument(span).await,
        EntityKind::Station => delete::<Station>(&pool, id).instrument(span).await,
    }
}

// ハンドラー: DELETE /api/:entity (id なし)
pub async fn delete_without_id(
    ApiPath(entity): ApiPath<String>,
) -> Result<Response, AppError> {
    parse_kind(&entity)?;
    Err(AppError::bad_request("request param id is required"))
}
