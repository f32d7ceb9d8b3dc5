mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo_types::WorkoutTotals;

pub fn router() -> Router<AppState> {
    handlers::workout_routes()
}
