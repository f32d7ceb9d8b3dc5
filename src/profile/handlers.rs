use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{ProfilePatch, ProfileResponse};
use super::repo;
use super::repo_types::UserProfile;
use crate::{
    auth::AuthUser,
    balance::{estimate_tmb, Profile, TmbMode},
    day,
    error::{bad_request, internal, not_found, ApiError},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).patch(patch_profile))
}

fn with_estimates(state: &AppState, profile: UserProfile) -> Result<ProfileResponse, ApiError> {
    let today = day::today(state.config.utc_offset);
    let calc = Profile::from(&profile);
    let tmb = estimate_tmb(&calc, today, TmbMode::Basal).map_err(|e| bad_request(e.to_string()))?;
    let maintenance_kcal = estimate_tmb(&calc, today, TmbMode::ActivityAdjusted)
        .map_err(|e| bad_request(e.to_string()))?;
    Ok(ProfileResponse {
        profile,
        tmb,
        maintenance_kcal,
    })
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = repo::find(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("profile"))?;
    Ok(Json(with_estimates(&state, profile)?))
}

#[instrument(skip(state, patch))]
pub async fn patch_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<ProfileResponse>, ApiError> {
    if let Err(msg) = patch.validate(day::today(state.config.utc_offset)) {
        warn!(%user_id, %msg, "invalid profile patch");
        return Err(bad_request(msg));
    }
    let profile = repo::update(&state.db, user_id, &patch)
        .await
        .map_err(internal)?;
    info!(%user_id, "profile updated");
    Ok(Json(with_estimates(&state, profile)?))
}
