//! Seed Query Handlers

use std::sync::Arc;

use crate::application::catalog::{SelectionPolicy, VoiceCatalog};
use crate::application::error::ApplicationError;
use crate::application::ports::{CharacterVoiceCachePort, CharacterVoiceKey};
use crate::application::queries::{GetCatalogMapping, RecommendSeeds, SelectBestSeed};
use crate::domain::preference::{recommend, select, FilterChain, PreferenceQuery};
use crate::domain::seed::{build_catalog_mapping, CatalogMapping, SeedId, SeedRecord};

// ============================================================================
// Response DTOs
// ============================================================================

/// 选种结果
#[derive(Debug, Clone)]
pub struct SelectedSeed {
    pub seed_id: SeedId,
    /// 缓存中的种子不在种子目录里时为 None
    pub record: Option<SeedRecord>,
    pub cached: bool,
}

/// 排序选种的缓存键，与 ResolveSeed 的键分属不同命名空间
fn character_key(query: &PreferenceQuery) -> Option<CharacterVoiceKey> {
    query.character_name.as_ref().map(|character| {
        CharacterVoiceKey::ranked(
            character.as_str(),
            query.gender.as_deref().unwrap_or_default(),
            query.age.as_deref().unwrap_or_default(),
            query.voice_preference.as_deref().unwrap_or_default(),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// SelectBestSeed Handler
pub struct SelectBestSeedHandler {
    catalog: Arc<VoiceCatalog>,
    policy: Arc<SelectionPolicy>,
    cache: Arc<dyn CharacterVoiceCachePort>,
}

impl SelectBestSeedHandler {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        policy: Arc<SelectionPolicy>,
        cache: Arc<dyn CharacterVoiceCachePort>,
    ) -> Self {
        Self {
            catalog,
            policy,
            cache,
        }
    }

    pub fn handle(&self, query: SelectBestSeed) -> Result<SelectedSeed, ApplicationError> {
        let query = query.query.normalized();
        let key = character_key(&query);

        if let Some(cached) = key.as_ref().and_then(|k| self.cache.get(k)) {
            tracing::debug!(seed_id = %cached.seed, key = %cached.key, "Character voice cache hit");
            return Ok(SelectedSeed {
                record: self.catalog.find_record(&cached.seed).cloned(),
                seed_id: cached.seed,
                cached: true,
            });
        }

        let candidates =
            FilterChain::for_query(&query, &self.policy.synonyms).apply(self.catalog.records());
        let best = select(candidates)?;

        let seed_id = match key {
            Some(key) => self.cache.insert_if_absent(key, best.id().clone()).seed,
            None => best.id().clone(),
        };

        tracing::info!(
            seed_id = %seed_id,
            rank_multi = best.rank_multi(),
            "Best seed selected: {}",
            best.summary()
        );

        Ok(SelectedSeed {
            record: self.catalog.find_record(&seed_id).cloned(),
            seed_id,
            cached: false,
        })
    }
}

/// RecommendSeeds Handler
pub struct RecommendSeedsHandler {
    catalog: Arc<VoiceCatalog>,
    policy: Arc<SelectionPolicy>,
}

impl RecommendSeedsHandler {
    pub fn new(catalog: Arc<VoiceCatalog>, policy: Arc<SelectionPolicy>) -> Self {
        Self { catalog, policy }
    }

    pub fn handle(&self, query: RecommendSeeds) -> Result<Vec<SeedRecord>, ApplicationError> {
        let top_n = query.top_n.unwrap_or(self.policy.recommend_top_n);
        if top_n == 0 {
            return Err(ApplicationError::validation("top_n must be greater than 0"));
        }

        let preference = query.query.normalized();
        let candidates =
            FilterChain::for_query(&preference, &self.policy.synonyms).apply(self.catalog.records());

        Ok(recommend(candidates, top_n).into_iter().cloned().collect())
    }
}

/// GetCatalogMapping Handler
pub struct GetCatalogMappingHandler {
    catalog: Arc<VoiceCatalog>,
}

impl GetCatalogMappingHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, _query: GetCatalogMapping) -> Result<CatalogMapping, ApplicationError> {
        Ok(build_catalog_mapping(self.catalog.records()))
    }
}
