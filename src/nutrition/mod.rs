//! Meal recognition through a generative model: a voice note, a photo or a
//! sentence goes in, a structured nutrition estimate comes out.

pub(crate) mod dto;
pub(crate) mod error;
mod extract;
pub(crate) mod extractor;
mod gemini;
pub mod handlers;

use crate::state::AppState;
use axum::Router;

pub use extractor::NutritionExtractor;
pub use gemini::GeminiClient;

pub fn router() -> Router<AppState> {
    handlers::nutrition_routes()
}
