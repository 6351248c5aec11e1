//! Voice Preference HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetAgeStyleCombinations, GetVoiceCandidates, GetVoicePreferences};
use crate::domain::style::{AgeStyleCombination, FrontendView, SeedIndexEntry};
use crate::infrastructure::http::dto::{ApiResponse, VoiceCandidatesRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 前端组合视图
pub async fn voice_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<FrontendView>>, ApiError> {
    let view = state.voice_preferences_handler.handle(GetVoicePreferences)?;
    Ok(Json(ApiResponse::success(view)))
}

/// 候选音色
pub async fn voice_candidates(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoiceCandidatesRequest>,
) -> Result<Json<ApiResponse<Vec<SeedIndexEntry>>>, ApiError> {
    let candidates = state.voice_candidates_handler.handle(GetVoiceCandidates {
        gender: req.gender,
        age: req.age,
        style: req.style,
    })?;
    Ok(Json(ApiResponse::success(candidates)))
}

/// 某性别下所有 (年龄, 风格) 组合
pub async fn voice_combinations(
    State(state): State<Arc<AppState>>,
    Path(gender): Path<String>,
) -> Result<Json<ApiResponse<Vec<AgeStyleCombination>>>, ApiError> {
    let combos = state
        .age_style_combinations_handler
        .handle(GetAgeStyleCombinations { gender })?;
    Ok(Json(ApiResponse::success(combos)))
}
