//! Seed Command Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::catalog::{SelectionPolicy, VoiceCatalog};
use crate::application::commands::ResolveSeed;
use crate::application::error::ApplicationError;
use crate::application::ports::{CharacterVoiceCachePort, CharacterVoiceKey, SeedPickerPort};
use crate::domain::preference::{select, FilterChain, PreferenceQuery};
use crate::domain::seed::SeedId;
use crate::domain::style::{resolve_exact, ResolutionTier, STYLE_SUFFIX};

// ============================================================================
// ResolveSeed
// ============================================================================

/// 种子来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    /// 角色缓存命中
    Cache,
    /// 精确匹配（随机选中）
    ExactMatch,
    /// 首个性别一致的种子
    GenderOnly,
    /// 固定默认种子
    Default,
    /// 过滤 + 排序
    Ranked,
}

impl From<ResolutionTier> for SeedSource {
    fn from(tier: ResolutionTier) -> Self {
        match tier {
            ResolutionTier::ExactMatch { .. } => Self::ExactMatch,
            ResolutionTier::GenderOnly => Self::GenderOnly,
            ResolutionTier::Default => Self::Default,
        }
    }
}

/// 解析结果
#[derive(Debug, Clone)]
pub struct ResolvedSeed {
    pub seed_id: SeedId,
    pub description: Option<String>,
    pub character: Option<String>,
    pub gender: Option<String>,
    pub gender_display: Option<String>,
    pub age: String,
    pub style: String,
    pub source: SeedSource,
}

/// ResolveSeed Handler
pub struct ResolveSeedHandler {
    catalog: Arc<VoiceCatalog>,
    policy: Arc<SelectionPolicy>,
    cache: Arc<dyn CharacterVoiceCachePort>,
    picker: Arc<dyn SeedPickerPort>,
}

impl ResolveSeedHandler {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        policy: Arc<SelectionPolicy>,
        cache: Arc<dyn CharacterVoiceCachePort>,
        picker: Arc<dyn SeedPickerPort>,
    ) -> Self {
        Self {
            catalog,
            policy,
            cache,
            picker,
        }
    }

    pub fn handle(&self, command: ResolveSeed) -> Result<ResolvedSeed, ApplicationError> {
        let normalizer = &self.policy.normalizer;
        let gender = normalizer.gender(command.gender.as_deref());
        let age = normalizer.age(command.age.as_deref(), &self.policy.default_age);
        let style = normalizer.style(command.style.as_deref(), &self.policy.default_style);
        let character = command
            .character
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let key = character.as_ref().map(|c| {
            CharacterVoiceKey::new(c.as_str(), gender.as_deref().unwrap_or_default(), &age, &style)
        });

        if let Some(cached) = key.as_ref().and_then(|k| self.cache.get(k)) {
            tracing::debug!(
                seed_id = %cached.seed,
                key = %cached.key,
                "Character voice cache hit"
            );
            let description = self
                .catalog
                .preferences()
                .describe(&cached.seed)
                .map(str::to_string);
            return Ok(self.response(cached.seed, description, character, gender, age, style, SeedSource::Cache));
        }

        let (seed, description, source) = match gender.as_deref() {
            Some(g) => {
                let resolution = resolve_exact(
                    self.catalog.preferences(),
                    g,
                    &age,
                    &style,
                    &self.policy.fallback_seeds,
                    |len| self.picker.pick_index(len),
                );
                (resolution.seed, resolution.description, resolution.tier.into())
            }
            None => {
                let query = PreferenceQuery::new()
                    .with_age(age.as_str())
                    .with_voice_preference(style.trim_end_matches(STYLE_SUFFIX));
                let candidates =
                    FilterChain::for_query(&query, &self.policy.synonyms).apply(self.catalog.records());
                let best = select(candidates)?;
                (best.id().clone(), Some(best.summary()), SeedSource::Ranked)
            }
        };

        let seed = match key {
            Some(key) => {
                let stored = self.cache.insert_if_absent(key, seed.clone());
                if stored.seed != seed {
                    tracing::debug!(
                        seed_id = %stored.seed,
                        discarded = %seed,
                        "Concurrent resolution already cached a seed"
                    );
                }
                stored.seed
            }
            None => seed,
        };

        tracing::info!(
            seed_id = %seed,
            character = character.as_deref().unwrap_or("-"),
            source = ?source,
            "Seed resolved for {}/{}",
            age,
            style
        );

        Ok(self.response(seed, description, character, gender, age, style, source))
    }

    #[allow(clippy::too_many_arguments)]
    fn response(
        &self,
        seed_id: SeedId,
        description: Option<String>,
        character: Option<String>,
        gender: Option<String>,
        age: String,
        style: String,
        source: SeedSource,
    ) -> ResolvedSeed {
        let gender_display = gender
            .as_deref()
            .map(|g| self.policy.gender_display(&self.catalog, g));
        ResolvedSeed {
            seed_id,
            description,
            character,
            gender,
            gender_display,
            age,
            style,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::fallback_catalog;
    use crate::domain::style::{SeedIndexEntry, VoicePreferences};
    use crate::infrastructure::memory::InMemoryCharacterVoiceCache;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 每次调用返回递增的下标
    struct CyclingPicker(AtomicUsize);

    impl SeedPickerPort for CyclingPicker {
        fn pick_index(&self, len: usize) -> usize {
            self.0.fetch_add(1, Ordering::SeqCst) % len
        }
    }

    fn entry(seed: u64, gender: &str, age: &str, style: &str) -> SeedIndexEntry {
        SeedIndexEntry {
            seed: SeedId::from(seed),
            gender: gender.to_string(),
            age: age.to_string(),
            style: style.to_string(),
            description: format!("seed {}", seed),
        }
    }

    fn handler_with(
        preferences: VoicePreferences,
    ) -> (ResolveSeedHandler, Arc<InMemoryCharacterVoiceCache>) {
        let cache = Arc::new(InMemoryCharacterVoiceCache::new());
        let handler = ResolveSeedHandler::new(
            Arc::new(VoiceCatalog::new(fallback_catalog(), preferences)),
            Arc::new(SelectionPolicy::default()),
            cache.clone(),
            Arc::new(CyclingPicker(AtomicUsize::new(0))),
        );
        (handler, cache)
    }

    fn index(entries: Vec<SeedIndexEntry>) -> VoicePreferences {
        VoicePreferences::new(Vec::new(), BTreeMap::new(), BTreeMap::new(), entries)
    }

    fn command(character: &str, gender: &str, age: &str, style: &str) -> ResolveSeed {
        ResolveSeed {
            character: Some(character.to_string()),
            gender: Some(gender.to_string()),
            age: Some(age.to_string()),
            style: Some(style.to_string()),
        }
    }

    #[test]
    fn test_exact_match_precedence() {
        let (handler, _) = handler_with(index(vec![
            entry(5, "女", "中年", "温柔风格"),
            entry(7, "女", "青年", "温柔风格"),
            entry(9, "男", "青年", "温柔风格"),
        ]));
        for i in 0..4 {
            let name = format!("角色{}", i);
            let r = handler.handle(command(&name, "女", "青年", "温柔风格")).unwrap();
            assert_eq!(r.seed_id.as_str(), "7");
            assert_eq!(r.source, SeedSource::ExactMatch);
        }
    }

    #[test]
    fn test_cache_idempotence() {
        let (handler, cache) = handler_with(index(vec![
            entry(1, "female", "年轻", "温柔风格"),
            entry(2, "female", "年轻", "温柔风格"),
            entry(3, "female", "年轻", "温柔风格"),
        ]));

        let first = handler.handle(command("Alice", "female", "年轻", "温柔风格")).unwrap();
        let second = handler.handle(command("Alice", "female", "年轻", "温柔风格")).unwrap();
        assert_eq!(first.seed_id, second.seed_id);
        assert_eq!(second.source, SeedSource::Cache);
        assert_eq!(cache.len(), 1);

        // 另一个角色由随机源选中下一个候选
        let other = handler.handle(command("Bob", "female", "年轻", "温柔风格")).unwrap();
        assert_ne!(other.seed_id, first.seed_id);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_anonymous_calls_skip_cache() {
        let (handler, cache) = handler_with(VoicePreferences::fallback());
        let mut cmd = command("  ", "female", "中年", "专业风格");
        let r = handler.handle(cmd.clone()).unwrap();
        assert_eq!(r.seed_id.as_str(), "1111");
        cmd.character = None;
        handler.handle(cmd).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_gender_only_fallback() {
        let (handler, _) = handler_with(index(vec![
            entry(9, "男", "中年", "专业风格"),
            entry(12, "女", "中年", "专业风格"),
        ]));
        let r = handler.handle(command("X", "女", "青年", "温柔风格")).unwrap();
        assert_eq!(r.seed_id.as_str(), "12");
        assert_eq!(r.source, SeedSource::GenderOnly);
    }

    #[test]
    fn test_defaults_and_normalization() {
        let (handler, cache) = handler_with(VoicePreferences::fallback());

        let r = handler
            .handle(ResolveSeed {
                character: Some("旁白".to_string()),
                gender: Some("女性".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(r.gender.as_deref(), Some("female"));
        assert_eq!(r.gender_display.as_deref(), Some("女性"));
        assert_eq!(r.age, "中年");
        assert_eq!(r.style, "专业风格");
        assert_eq!(r.seed_id.as_str(), "1111");

        let key = CharacterVoiceKey::new("旁白", "female", "中年", "专业风格");
        assert!(cache.get(&key).is_some());

        let r = handler.handle(command("小美", "女性", "young", "casual")).unwrap();
        assert_eq!(r.style, "温柔风格");
        assert_eq!(r.seed_id.as_str(), "2");
    }

    #[test]
    fn test_default_seed_when_gender_unknown_to_catalog() {
        let (handler, _) = handler_with(VoicePreferences::fallback());
        let r = handler.handle(command("老王", "男", "中年", "专业风格")).unwrap();
        assert_eq!(r.seed_id.as_str(), "666");
        assert_eq!(r.source, SeedSource::Default);
    }

    #[test]
    fn test_ranked_path_without_gender() {
        let (handler, _) = handler_with(VoicePreferences::fallback());
        let r = handler
            .handle(ResolveSeed {
                character: Some("路人".to_string()),
                gender: None,
                age: Some("中年".to_string()),
                style: Some("温柔风格".to_string()),
            })
            .unwrap();
        // 中年 → {2241, 614, 579}，温柔 → {温柔, 亲切} → {2241, 614}
        assert_eq!(r.seed_id.as_str(), "2241");
        assert_eq!(r.source, SeedSource::Ranked);
    }

    #[test]
    fn test_cached_character_ignores_later_catalog() {
        let cache = Arc::new(InMemoryCharacterVoiceCache::new());
        let policy = Arc::new(SelectionPolicy::default());
        let picker: Arc<dyn SeedPickerPort> = Arc::new(CyclingPicker(AtomicUsize::new(0)));
        let command = ResolveSeed {
            character: Some("路人".to_string()),
            gender: None,
            age: Some("中年".to_string()),
            style: Some("温柔风格".to_string()),
        };

        let before = ResolveSeedHandler::new(
            Arc::new(VoiceCatalog::new(fallback_catalog(), VoicePreferences::fallback())),
            policy.clone(),
            cache.clone(),
            picker.clone(),
        );
        assert_eq!(before.handle(command.clone()).unwrap().seed_id.as_str(), "2241");

        // 去掉 2241 后同样的查询会排出 614
        let without_2241 = fallback_catalog()
            .into_iter()
            .filter(|r| r.id().as_str() != "2241")
            .collect();
        let after = ResolveSeedHandler::new(
            Arc::new(VoiceCatalog::new(without_2241, VoicePreferences::fallback())),
            policy,
            cache.clone(),
            picker,
        );
        let fresh = after
            .handle(ResolveSeed {
                character: None,
                ..command.clone()
            })
            .unwrap();
        assert_eq!(fresh.seed_id.as_str(), "614");

        let cached = after.handle(command).unwrap();
        assert_eq!(cached.seed_id.as_str(), "2241");
        assert_eq!(cached.source, SeedSource::Cache);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ranked_path_on_empty_catalog_fails() {
        let handler = ResolveSeedHandler::new(
            Arc::new(VoiceCatalog::new(Vec::new(), VoicePreferences::fallback())),
            Arc::new(SelectionPolicy::default()),
            Arc::new(InMemoryCharacterVoiceCache::new()),
            Arc::new(CyclingPicker(AtomicUsize::new(0))),
        );
        let result = handler.handle(ResolveSeed::default());
        assert!(matches!(result, Err(ApplicationError::NoSeedAvailable)));
    }
}
