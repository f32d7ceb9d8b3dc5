use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{MealPatch, MealsByType, NewMeal};
use super::repo;
use super::repo_types::{Meal, MealTotals};
use crate::{
    auth::AuthUser,
    day::{day_range, DayQuery},
    error::{bad_request, internal, not_found, ApiError},
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/by-type", get(meals_by_type))
        .route("/meals/totals", get(meal_totals))
        .route("/meals/:id", patch(update_meal).delete(delete_meal))
}

async fn load_day(state: &AppState, user_id: Uuid, q: &DayQuery) -> Result<Vec<Meal>, ApiError> {
    let offset = state.config.utc_offset;
    let (start, end) = day_range(q.resolve(offset)?, offset);
    repo::list_for_day(&state.db, user_id, start, end)
        .await
        .map_err(internal)
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    Ok(Json(load_day(&state, user_id, &q).await?))
}

#[instrument(skip(state))]
pub async fn meals_by_type(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<MealsByType>, ApiError> {
    let meals = load_day(&state, user_id, &q).await?;
    Ok(Json(MealsByType::group(meals)))
}

#[instrument(skip(state))]
pub async fn meal_totals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<MealTotals>, ApiError> {
    let offset = state.config.utc_offset;
    let (start, end) = day_range(q.resolve(offset)?, offset);
    let totals = repo::day_totals(&state.db, user_id, start, end)
        .await
        .map_err(internal)?;
    Ok(Json(totals))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<NewMeal>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    if let Err(msg) = body.validate() {
        warn!(%user_id, %msg, "invalid meal");
        return Err(bad_request(msg));
    }
    let meal = repo::insert(&state.db, user_id, &body)
        .await
        .map_err(internal)?;
    info!(%user_id, meal_id = %meal.id, calories = meal.calories, "meal logged");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MealPatch>,
) -> Result<Json<Meal>, ApiError> {
    body.validate().map_err(bad_request)?;
    repo::update(&state.db, user_id, id, &body)
        .await
        .map_err(internal)?
        .map(Json)
        .ok_or_else(|| not_found("meal"))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete(&state.db, user_id, id).await.map_err(internal)? {
        info!(%user_id, meal_id = %id, "meal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("meal"))
    }
}
