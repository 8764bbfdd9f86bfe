pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::profile::handlers::handle_profile_review;
use crate::readme::handlers::handle_generate_readme;
use crate::state::AppState;
use crate::visualizer::handlers::handle_visualize_repository;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/profile-review", post(handle_profile_review))
        .route("/api/readme-generator", post(handle_generate_readme))
        .route("/api/repo-visualizer", post(handle_visualize_repository))
        .with_state(state)
}
