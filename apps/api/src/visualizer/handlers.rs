use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::visualizer::models::{VisualizeRequest, VisualizeResponse};
use crate::visualizer::stats::visualize_repository;

/// POST /api/repo-visualizer
pub async fn handle_visualize_repository(
    State(state): State<AppState>,
    payload: Result<Json<VisualizeRequest>, JsonRejection>,
) -> Result<Json<VisualizeResponse>, AppError> {
    let Json(request) = payload?;
    let (owner, name) = request.owner_and_name()?;

    let response = visualize_repository(&state.github, owner, name).await?;

    Ok(Json(response))
}
