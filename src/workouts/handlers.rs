use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::NewWorkout;
use super::repo;
use super::repo_types::{Workout, WorkoutTotals};
use crate::{
    auth::AuthUser,
    day::{day_range, DayQuery},
    error::{bad_request, internal, not_found, ApiError},
    state::AppState,
};

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/totals", get(workout_totals))
        .route("/workouts/:id", delete(delete_workout))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let offset = state.config.utc_offset;
    let (start, end) = day_range(q.resolve(offset)?, offset);
    let rows = repo::list_for_day(&state.db, user_id, start, end)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn workout_totals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<WorkoutTotals>, ApiError> {
    let offset = state.config.utc_offset;
    let (start, end) = day_range(q.resolve(offset)?, offset);
    let totals = repo::day_totals(&state.db, user_id, start, end)
        .await
        .map_err(internal)?;
    Ok(Json(totals))
}

#[instrument(skip(state, body))]
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    if let Err(msg) = body.validate() {
        warn!(%user_id, %msg, "invalid workout");
        return Err(bad_request(msg));
    }
    let workout = repo::insert(&state.db, user_id, &body)
        .await
        .map_err(internal)?;
    info!(%user_id, workout_id = %workout.id, kcal = workout.calories_burned, "workout logged");
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete(&state.db, user_id, id).await.map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("workout"))
    }
}
