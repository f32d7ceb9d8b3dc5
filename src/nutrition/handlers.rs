use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{AnalyzeTextRequest, NutritionAnalysis};
use super::error::NutritionError;
use super::extractor::NutritionInput;
use crate::{
    auth::AuthUser,
    error::{bad_request, ApiError},
    state::AppState,
};

/// Uploads larger than this are refused before reaching the handler.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/analyze", post(analyze_media))
        .route("/nutrition/analyze/text", post(analyze_text))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

fn rejected(user_id: Uuid, e: NutritionError) -> ApiError {
    let status = e.status();
    if status.is_server_error() {
        error!(%user_id, error = %e, "nutrition analysis failed");
    } else {
        warn!(%user_id, error = %e, "nutrition analysis rejected");
    }
    (status, e.to_string())
}

async fn run(
    state: &AppState,
    user_id: Uuid,
    input: NutritionInput,
) -> Result<Json<NutritionAnalysis>, ApiError> {
    let kind = input.kind();
    let analysis = state
        .nutrition
        .analyze(input)
        .await
        .map_err(|e| rejected(user_id, e))?;
    info!(%user_id, kind, meal = %analysis.name, kcal = analysis.calories, "meal analyzed");
    Ok(Json(analysis))
}

/// POST /nutrition/analyze (multipart, field `file`: audio or image)
#[instrument(skip(state, mp))]
pub async fn analyze_media(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<Json<NutritionAnalysis>, ApiError> {
    let mut upload = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".into());
        let data = field.bytes().await.map_err(|e| bad_request(e.body_text()))?;
        upload = Some((data, content_type));
        break;
    }
    let (data, content_type) = upload.ok_or_else(|| bad_request("file is required"))?;

    let input = NutritionInput::media(data, &content_type).map_err(|e| rejected(user_id, e))?;
    run(&state, user_id, input).await
}

/// POST /nutrition/analyze/text { description }
#[instrument(skip(state, body))]
pub async fn analyze_text(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AnalyzeTextRequest>,
) -> Result<Json<NutritionAnalysis>, ApiError> {
    let description = body.description.trim();
    if description.is_empty() {
        return Err(bad_request("description is required"));
    }
    run(&state, user_id, NutritionInput::Text(description.to_string())).await
}
