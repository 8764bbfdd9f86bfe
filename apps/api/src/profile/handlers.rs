use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::profile::models::{ProfileReviewRequest, ProfileReviewResponse};
use crate::profile::review::review_profile;
use crate::state::AppState;

/// POST /api/profile-review
///
/// Reviews a GitHub profile and returns the aggregated data with the model's scoring.
pub async fn handle_profile_review(
    State(state): State<AppState>,
    payload: Result<Json<ProfileReviewRequest>, JsonRejection>,
) -> Result<Json<ProfileReviewResponse>, AppError> {
    let Json(request) = payload?;
    let username = request.username()?;

    let response = review_profile(&state.github, state.llm.as_ref(), username).await?;

    Ok(Json(response))
}
