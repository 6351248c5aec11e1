//! Seed HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetCatalogMapping, RecommendSeeds, ResolveSeed, SelectBestSeed};
use crate::domain::preference::PreferenceQuery;
use crate::domain::seed::CatalogMapping;
use crate::infrastructure::http::dto::{
    ApiResponse, RecommendSeedsRequest, ResolveSeedRequest, ResolveSeedResponse,
    SeedRecordResponse, SelectSeedResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 为角色解析种子（精确匹配 + 角色缓存）
pub async fn resolve_seed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveSeedRequest>,
) -> Result<Json<ApiResponse<ResolveSeedResponse>>, ApiError> {
    let resolved = state.resolve_seed_handler.handle(ResolveSeed {
        character: req.character,
        gender: req.gender,
        age: req.age,
        style: req.style,
    })?;

    Ok(Json(ApiResponse::success(resolved.into())))
}

/// 过滤 + 排序选出最佳种子
pub async fn select_seed(
    State(state): State<Arc<AppState>>,
    Json(query): Json<PreferenceQuery>,
) -> Result<Json<ApiResponse<SelectSeedResponse>>, ApiError> {
    let selected = state
        .select_best_seed_handler
        .handle(SelectBestSeed { query })?;

    Ok(Json(ApiResponse::success(selected.into())))
}

/// 推荐前 N 个种子
pub async fn recommend_seeds(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendSeedsRequest>,
) -> Result<Json<ApiResponse<Vec<SeedRecordResponse>>>, ApiError> {
    let records = state.recommend_seeds_handler.handle(RecommendSeeds {
        query: req.query,
        top_n: req.top_n,
    })?;

    Ok(Json(ApiResponse::success(
        records.iter().map(SeedRecordResponse::from).collect(),
    )))
}

/// 性别 / 年龄 / 特征 速查表
pub async fn catalog_mapping(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CatalogMapping>>, ApiError> {
    let mapping = state.catalog_mapping_handler.handle(GetCatalogMapping)?;
    Ok(Json(ApiResponse::success(mapping)))
}
