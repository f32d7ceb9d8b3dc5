use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::MeasurementBody;
use super::repo;
use super::repo_types::Measurement;
use crate::{
    auth::AuthUser,
    day,
    error::{bad_request, internal, not_found, ApiError},
    state::AppState,
};

pub fn measurement_routes() -> Router<AppState> {
    Router::new()
        .route("/measurements", get(list_measurements).post(create_measurement))
        .route("/measurements/latest", get(latest_measurement))
        .route(
            "/measurements/:id",
            patch(update_measurement).delete(delete_measurement),
        )
}

#[instrument(skip(state))]
pub async fn list_measurements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let rows = repo::list(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn latest_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Measurement>, ApiError> {
    repo::latest(&state.db, user_id)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("measurement"))
}

#[instrument(skip(state, body))]
pub async fn create_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MeasurementBody>,
) -> Result<(StatusCode, Json<Measurement>), ApiError> {
    body.validate().map_err(bad_request)?;
    let date = body
        .measurement_date
        .unwrap_or_else(|| day::today(state.config.utc_offset));
    let row = repo::insert(&state.db, user_id, date, &body)
        .await
        .map_err(internal)?;
    info!(%user_id, measurement_id = %row.id, "measurement recorded");
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state, body))]
pub async fn update_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MeasurementBody>,
) -> Result<Json<Measurement>, ApiError> {
    body.validate().map_err(bad_request)?;
    repo::update(&state.db, user_id, id, &body)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("measurement"))
}

#[instrument(skip(state))]
pub async fn delete_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete(&state.db, user_id, id).await.map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("measurement"))
    }
}
