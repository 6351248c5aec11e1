//! Character HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListCharacterVoices;
use crate::infrastructure::http::dto::{ApiResponse, CharacterVoiceResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 已缓存的角色音色
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CharacterVoiceResponse>>>, ApiError> {
    let voices = state
        .list_character_voices_handler
        .handle(ListCharacterVoices)?;
    Ok(Json(ApiResponse::success(
        voices.into_iter().map(CharacterVoiceResponse::from).collect(),
    )))
}
