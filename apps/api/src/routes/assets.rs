use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnimationsResponse {
    pub ai: Option<Value>,
    pub analysis: Option<Value>,
    pub warnings: Vec<String>,
}

/// GET /api/v1/assets/animations
pub async fn handle_get_animations(State(state): State<AppState>) -> Json<AnimationsResponse> {
    let assets = state.animations.as_ref();
    Json(AnimationsResponse {
        ai: assets.ai.clone(),
        analysis: assets.analysis.clone(),
        warnings: assets.warnings(),
    })
}
