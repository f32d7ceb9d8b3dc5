use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("nutrition model is not configured")]
    NotConfigured,

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("nutrition model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("nutrition model returned {0}")]
    Upstream(String),

    #[error("no nutrition data found in model response")]
    NoJson,

    #[error("malformed nutrition data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid nutrition data: {0}")]
    Invalid(String),
}

impl NutritionError {
    pub fn status(&self) -> StatusCode {
        match self {
            NutritionError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            NutritionError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            NutritionError::Http(_) | NutritionError::Upstream(_) => StatusCode::BAD_GATEWAY,
            NutritionError::NoJson | NutritionError::Malformed(_) | NutritionError::Invalid(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}
