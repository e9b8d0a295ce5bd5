//! Route handlers for `/api/timezones` and `/health`.

use crate::error::ApiError;
use crate::SharedState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use timezones_core::{core_version, to_output, TimeZoneId, TimeZoneInput, TimeZoneOutput};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": core_version() }))
}

pub async fn list_time_zones(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TimeZoneOutput>>, ApiError> {
    let records = state.with_service(|service| service.list())?;
    Ok(Json(records.iter().map(to_output).collect()))
}

pub async fn get_time_zone(
    State(state): State<SharedState>,
    Path(id): Path<TimeZoneId>,
) -> Result<Json<TimeZoneOutput>, ApiError> {
    let record = state.with_service(|service| service.get_by_id(id))?;
    Ok(Json(to_output(&record)))
}

pub async fn create_time_zone(
    State(state): State<SharedState>,
    payload: Result<Json<TimeZoneInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TimeZoneOutput>), ApiError> {
    let Json(input) = payload?;
    let record = state.with_service(|service| service.create(&input))?;
    Ok((StatusCode::CREATED, Json(to_output(&record))))
}

/// Serves both PATCH and PUT; either replaces all three mutable fields.
pub async fn update_time_zone(
    State(state): State<SharedState>,
    Path(id): Path<TimeZoneId>,
    payload: Result<Json<TimeZoneInput>, JsonRejection>,
) -> Result<Json<TimeZoneOutput>, ApiError> {
    let Json(input) = payload?;
    let record = state.with_service(|service| service.update(id, &input))?;
    Ok(Json(to_output(&record)))
}

pub async fn delete_time_zone(
    State(state): State<SharedState>,
    Path(id): Path<TimeZoneId>,
) -> Result<StatusCode, ApiError> {
    state.with_service(|service| service.delete(id))?;
    Ok(StatusCode::NO_CONTENT)
}
