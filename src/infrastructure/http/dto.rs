//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{CachedVoice, ResolvedSeed, SeedSource, SelectedSeed, VoiceKeyScope};
use crate::domain::preference::PreferenceQuery;
use crate::domain::seed::{Distribution, Feature, RankScores, SeedRecord};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Seed DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ResolveSeedRequest {
    #[serde(default, alias = "character_name")]
    pub character: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveSeedResponse {
    pub seed_id: String,
    pub description: Option<String>,
    pub character: Option<String>,
    pub gender: Option<String>,
    pub gender_display: Option<String>,
    pub age: String,
    pub style: String,
    pub source: SeedSource,
}

impl From<ResolvedSeed> for ResolveSeedResponse {
    fn from(resolved: ResolvedSeed) -> Self {
        Self {
            seed_id: resolved.seed_id.to_string(),
            description: resolved.description,
            character: resolved.character,
            gender: resolved.gender,
            gender_display: resolved.gender_display,
            age: resolved.age,
            style: resolved.style,
            source: resolved.source,
        }
    }
}

/// 推荐请求：偏好字段 + 可选 top_n
#[derive(Debug, Default, Deserialize)]
pub struct RecommendSeedsRequest {
    #[serde(flatten)]
    pub query: PreferenceQuery,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SeedRecordResponse {
    pub seed_id: String,
    pub rank_multi: f64,
    pub ranks: RankScores,
    pub gender: Distribution,
    pub age: Distribution,
    pub features: Vec<Feature>,
    pub summary: String,
}

impl From<&SeedRecord> for SeedRecordResponse {
    fn from(record: &SeedRecord) -> Self {
        Self {
            seed_id: record.id().to_string(),
            rank_multi: record.rank_multi(),
            ranks: *record.ranks(),
            gender: record.gender().clone(),
            age: record.age().clone(),
            features: record.features().to_vec(),
            summary: record.summary(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectSeedResponse {
    pub seed_id: String,
    pub cached: bool,
    pub record: Option<SeedRecordResponse>,
}

impl From<SelectedSeed> for SelectSeedResponse {
    fn from(selected: SelectedSeed) -> Self {
        Self {
            seed_id: selected.seed_id.to_string(),
            cached: selected.cached,
            record: selected.record.as_ref().map(SeedRecordResponse::from),
        }
    }
}

// ============================================================================
// Voice Preference DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct VoiceCandidatesRequest {
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

// ============================================================================
// Character DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CharacterVoiceResponse {
    pub character: String,
    pub gender: String,
    pub age: String,
    pub style: String,
    pub scope: VoiceKeyScope,
    pub seed_id: String,
    pub resolved_at: String,
}

impl From<CachedVoice> for CharacterVoiceResponse {
    fn from(voice: CachedVoice) -> Self {
        Self {
            character: voice.key.character,
            gender: voice.key.gender,
            age: voice.key.age,
            style: voice.key.style,
            scope: voice.key.scope,
            seed_id: voice.seed.to_string(),
            resolved_at: voice.resolved_at.to_rfc3339(),
        }
    }
}
