use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument, warn};

use super::services;
use super::weekly::{compute_weekly_balance, day_balance, DayBalance, WeeklyBalance};
use super::BalanceError;
use crate::{
    auth::AuthUser,
    day::{self, DayQuery},
    error::{bad_request, internal, ApiError},
    state::AppState,
};

pub fn balance_routes() -> Router<AppState> {
    Router::new()
        .route("/balance/daily", get(daily_balance))
        .route("/balance/weekly", get(weekly_balance))
}

fn rejected(e: BalanceError) -> ApiError {
    warn!(error = %e, "balance input rejected");
    bad_request(e.to_string())
}

#[instrument(skip(state))]
pub async fn daily_balance(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<DayBalance>, ApiError> {
    let offset = state.config.utc_offset;
    let date = q.resolve(offset)?;

    let (profile, aggregate) = tokio::try_join!(
        services::load_profile(&state.db, user_id),
        services::load_day_aggregate(&state.db, user_id, date, offset),
    )
    .map_err(internal)?;

    let day = day_balance(&profile, day::today(offset), &aggregate).map_err(rejected)?;
    debug!(%user_id, %date, balance = day.balance.balance, "daily balance");
    Ok(Json(day))
}

/// Seven days ending on `?date=` (default today).
#[instrument(skip(state))]
pub async fn weekly_balance(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<WeeklyBalance>, ApiError> {
    let offset = state.config.utc_offset;
    let end = q.resolve(offset)?;

    let (profile, aggregates) = tokio::try_join!(
        services::load_profile(&state.db, user_id),
        services::load_week_aggregates(&state.db, user_id, end, offset),
    )
    .map_err(internal)?;

    let week = compute_weekly_balance(&profile, day::today(offset), end, &aggregates)
        .map_err(rejected)?;
    debug!(
        %user_id,
        %end,
        average = week.average_balance,
        total = week.total_deficit,
        "weekly balance"
    );
    Ok(Json(week))
}
