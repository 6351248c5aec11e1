//! Ping Handler
//!
//! 健康检查，附带目录规模

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub seeds: usize,
    pub styles: usize,
    pub cached_characters: usize,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        seeds: state.catalog.records().len(),
        styles: state.catalog.preferences().styles().len(),
        cached_characters: state.voice_cache.len(),
    })
}
