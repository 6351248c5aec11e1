//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ResolveSeedHandler,
    // Query handlers
    GetAgeStyleCombinationsHandler, GetCatalogMappingHandler, GetVoiceCandidatesHandler,
    GetVoicePreferencesHandler, ListCharacterVoicesHandler, RecommendSeedsHandler,
    SelectBestSeedHandler,
    // Ports
    CharacterVoiceCachePort, SeedPickerPort,
    // Catalog
    SelectionPolicy, VoiceCatalog,
};

/// 应用状态
///
/// 目录只读；角色缓存为进程内共享状态
pub struct AppState {
    // ========== Shared ==========
    pub catalog: Arc<VoiceCatalog>,
    pub policy: Arc<SelectionPolicy>,
    pub voice_cache: Arc<dyn CharacterVoiceCachePort>,

    // ========== Command Handlers ==========
    pub resolve_seed_handler: ResolveSeedHandler,

    // ========== Query Handlers ==========
    pub select_best_seed_handler: SelectBestSeedHandler,
    pub recommend_seeds_handler: RecommendSeedsHandler,
    pub catalog_mapping_handler: GetCatalogMappingHandler,
    pub voice_preferences_handler: GetVoicePreferencesHandler,
    pub voice_candidates_handler: GetVoiceCandidatesHandler,
    pub age_style_combinations_handler: GetAgeStyleCombinationsHandler,
    pub list_character_voices_handler: ListCharacterVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        policy: Arc<SelectionPolicy>,
        voice_cache: Arc<dyn CharacterVoiceCachePort>,
        picker: Arc<dyn SeedPickerPort>,
    ) -> Self {
        Self {
            // Command handlers
            resolve_seed_handler: ResolveSeedHandler::new(
                catalog.clone(),
                policy.clone(),
                voice_cache.clone(),
                picker,
            ),

            // Query handlers
            select_best_seed_handler: SelectBestSeedHandler::new(
                catalog.clone(),
                policy.clone(),
                voice_cache.clone(),
            ),
            recommend_seeds_handler: RecommendSeedsHandler::new(catalog.clone(), policy.clone()),
            catalog_mapping_handler: GetCatalogMappingHandler::new(catalog.clone()),
            voice_preferences_handler: GetVoicePreferencesHandler::new(catalog.clone()),
            voice_candidates_handler: GetVoiceCandidatesHandler::new(
                catalog.clone(),
                policy.clone(),
            ),
            age_style_combinations_handler: GetAgeStyleCombinationsHandler::new(
                catalog.clone(),
                policy.clone(),
            ),
            list_character_voices_handler: ListCharacterVoicesHandler::new(voice_cache.clone()),

            // Shared
            catalog,
            policy,
            voice_cache,
        }
    }
}
