use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{PutSteps, StepsResponse};
use super::repo;
use super::repo_types::DailySteps;
use crate::{
    auth::AuthUser,
    balance::steps_to_kcal,
    day::{self, DayQuery},
    error::{bad_request, internal, ApiError},
    state::AppState,
};

pub fn steps_routes() -> Router<AppState> {
    Router::new().route("/steps", get(get_steps).put(put_steps))
}

#[instrument(skip(state))]
pub async fn get_steps(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<StepsResponse>, ApiError> {
    let date = q.resolve(state.config.utc_offset)?;
    let steps = repo::find_for_date(&state.db, user_id, date)
        .await
        .map_err(internal)?;
    Ok(Json(StepsResponse { date, steps }))
}

#[instrument(skip(state, body))]
pub async fn put_steps(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<PutSteps>,
) -> Result<Json<DailySteps>, ApiError> {
    let calories_burned = match steps_to_kcal(body.steps_count) {
        Ok(kcal) => kcal,
        Err(e) => {
            warn!(%user_id, steps = body.steps_count, "rejected step count");
            return Err(bad_request(e.to_string()));
        }
    };
    let date = body
        .step_date
        .unwrap_or_else(|| day::today(state.config.utc_offset));

    let row = repo::upsert(&state.db, user_id, date, body.steps_count, calories_burned)
        .await
        .map_err(internal)?;
    info!(%user_id, %date, steps = row.steps_count, kcal = row.calories_burned, "steps recorded");
    Ok(Json(row))
}
