use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::readme::generator::generate_readme;
use crate::readme::models::{ReadmeRequest, ReadmeResponse};
use crate::state::AppState;

/// POST /api/readme-generator
///
/// Drafts a README for a repository from its metadata and up to ten source files.
pub async fn handle_generate_readme(
    State(state): State<AppState>,
    payload: Result<Json<ReadmeRequest>, JsonRejection>,
) -> Result<Json<ReadmeResponse>, AppError> {
    let Json(request) = payload?;
    let target = request.target()?;

    let response = generate_readme(&state.github, state.llm.as_ref(), &target).await?;

    Ok(Json(response))
}
