//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET   健康检查
//! - /api/voice-preferences         GET   前端组合视图
//! - /api/resolve-seed              POST  为角色解析种子
//! - /api/seed/select               POST  过滤 + 排序选出最佳种子
//! - /api/seed/recommend            POST  推荐前 N 个种子
//! - /api/seed/mapping              GET   性别 / 年龄 / 特征 速查表
//! - /api/voice-candidates          POST  候选音色
//! - /api/voice-combinations/:gender GET  某性别下的 (年龄, 风格) 组合
//! - /api/characters                GET   已缓存的角色音色

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/voice-preferences", get(handlers::voice_preferences))
        .route("/resolve-seed", post(handlers::resolve_seed))
        .route("/voice-candidates", post(handlers::voice_candidates))
        .route("/voice-combinations/:gender", get(handlers::voice_combinations))
        .route("/characters", get(handlers::list_characters))
        .nest("/seed", seed_routes())
}

/// Seed 路由
fn seed_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/select", post(handlers::select_seed))
        .route("/recommend", post(handlers::recommend_seeds))
        .route("/mapping", get(handlers::catalog_mapping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{SeedPickerPort, SelectionPolicy, VoiceCatalog};
    use crate::domain::seed::fallback_catalog;
    use crate::domain::style::VoicePreferences;
    use crate::infrastructure::memory::InMemoryCharacterVoiceCache;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    struct FirstPicker;

    impl SeedPickerPort for FirstPicker {
        fn pick_index(&self, _len: usize) -> usize {
            0
        }
    }

    fn app_with(catalog: VoiceCatalog) -> Router {
        let state = AppState::new(
            Arc::new(catalog),
            Arc::new(SelectionPolicy::default()),
            Arc::new(InMemoryCharacterVoiceCache::new()),
            Arc::new(FirstPicker),
        );
        create_routes().with_state(Arc::new(state))
    }

    fn app() -> Router {
        app_with(VoiceCatalog::new(
            fallback_catalog(),
            VoicePreferences::fallback(),
        ))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = call(&app(), Method::GET, "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["seeds"], fallback_catalog().len());
        assert_eq!(body["styles"], 6);
        assert_eq!(body["cached_characters"], 0);
    }

    #[tokio::test]
    async fn test_resolve_seed_is_stable_per_character() {
        let app = app();
        let request = json!({
            "character": "旁白",
            "gender": "女性",
            "age": "年轻",
            "style": "casual"
        });

        let (_, first) = call(&app, Method::POST, "/api/resolve-seed", Some(request.clone())).await;
        assert_eq!(first["errno"], 0);
        assert_eq!(first["data"]["seed_id"], "2");
        assert_eq!(first["data"]["style"], "温柔风格");
        assert_eq!(first["data"]["source"], "exact_match");

        let (_, second) = call(&app, Method::POST, "/api/resolve-seed", Some(request)).await;
        assert_eq!(second["data"]["seed_id"], "2");
        assert_eq!(second["data"]["source"], "cache");

        let (_, characters) = call(&app, Method::GET, "/api/characters", None).await;
        let list = characters["data"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["character"], "旁白");
        assert_eq!(list[0]["gender"], "female");
    }

    #[tokio::test]
    async fn test_select_and_recommend() {
        let app = app();

        let (_, selected) = call(
            &app,
            Method::POST,
            "/api/seed/select",
            Some(json!({ "gender": "男" })),
        )
        .await;
        assert_eq!(selected["errno"], 0);
        assert_eq!(selected["data"]["seed_id"], "579");
        assert_eq!(selected["data"]["cached"], false);

        let (_, recommended) = call(
            &app,
            Method::POST,
            "/api/seed/recommend",
            Some(json!({ "gender": "女", "top_n": 2 })),
        )
        .await;
        let ids: Vec<&str> = recommended["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["seed_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1283", "2241"]);

        let (status, invalid) = call(
            &app,
            Method::POST,
            "/api/seed/recommend",
            Some(json!({ "top_n": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(invalid["errno"], 400);
        assert!(invalid["data"].is_null());
    }

    #[tokio::test]
    async fn test_catalog_mapping() {
        let (_, body) = call(&app(), Method::GET, "/api/seed/mapping", None).await;
        assert_eq!(body["data"]["gender_mapping"]["男"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_voice_preferences_view() {
        let (_, body) = call(&app(), Method::GET, "/api/voice-preferences", None).await;
        let data = &body["data"];
        assert_eq!(data["统计信息"]["总风格数"], 6);
        assert_eq!(data["统计信息"]["总种子数"], 7);
        assert!(data["声音偏好"]["温柔风格"].is_object());
    }

    #[tokio::test]
    async fn test_voice_candidates_and_combinations() {
        let app = app();

        let (_, candidates) = call(
            &app,
            Method::POST,
            "/api/voice-candidates",
            Some(json!({ "gender": "女性", "age": "young" })),
        )
        .await;
        assert_eq!(candidates["errno"], 0);
        let list = candidates["data"].as_array().unwrap();
        assert!(!list.is_empty());
        assert!(list.iter().all(|c| c["age"] == "年轻"));

        let (_, blank) = call(
            &app,
            Method::POST,
            "/api/voice-candidates",
            Some(json!({ "gender": " " })),
        )
        .await;
        assert_eq!(blank["errno"], 400);

        let (_, combos) = call(&app, Method::GET, "/api/voice-combinations/female", None).await;
        assert!(!combos["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog_reports_no_seed() {
        let app = app_with(VoiceCatalog::new(Vec::new(), VoicePreferences::fallback()));
        let (_, body) = call(&app, Method::POST, "/api/seed/select", Some(json!({}))).await;
        assert_eq!(body["errno"], 503);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder()
            .uri("/api/voices/list")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
