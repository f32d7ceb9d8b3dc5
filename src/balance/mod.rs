//! Daily and weekly calorie balance.
//!
//! `tmb`, `steps`, `daily` and `weekly` are pure and synchronous; `services`
//! loads their inputs from the database and `handlers` exposes them over HTTP.

mod daily;
mod error;
pub mod handlers;
mod model;
pub mod services;
mod steps;
mod tmb;
mod weekly;

use crate::state::AppState;
use axum::Router;

pub use error::BalanceError;
pub use model::{ActivityLevel, Profile, Sex};
pub use steps::steps_to_kcal;
pub use tmb::{estimate_tmb, TmbMode};

pub fn router() -> Router<AppState> {
    handlers::balance_routes()
}
