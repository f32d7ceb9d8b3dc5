use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::SearchQuery;
use super::repo;
use super::repo_types::{Exercise, Food};
use crate::{
    auth::AuthUser,
    error::{internal, ApiError},
    state::AppState,
};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(search_foods))
        .route("/exercises", get(search_exercises))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Food>>, ApiError> {
    let rows = repo::foods(&state.db, user_id, &q.lookup())
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn search_exercises(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let rows = repo::exercises(&state.db, user_id, &q.lookup())
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}
