//! In-Memory Character Voice Cache Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{CachedVoice, CharacterVoiceCachePort, CharacterVoiceKey};
use crate::domain::seed::SeedId;

/// 内存角色音色缓存
pub struct InMemoryCharacterVoiceCache {
    voices: DashMap<CharacterVoiceKey, CachedVoice>,
}

impl InMemoryCharacterVoiceCache {
    pub fn new() -> Self {
        Self {
            voices: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryCharacterVoiceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterVoiceCachePort for InMemoryCharacterVoiceCache {
    fn get(&self, key: &CharacterVoiceKey) -> Option<CachedVoice> {
        self.voices.get(key).map(|v| v.clone())
    }

    fn insert_if_absent(&self, key: CharacterVoiceKey, seed: SeedId) -> CachedVoice {
        let entry = self
            .voices
            .entry(key.clone())
            .or_insert_with(|| {
                tracing::info!(key = %key, seed_id = %seed, "Character voice cached");
                CachedVoice {
                    key,
                    seed,
                    resolved_at: Utc::now(),
                }
            });
        entry.value().clone()
    }

    fn entries(&self) -> Vec<CachedVoice> {
        self.voices.iter().map(|e| e.value().clone()).collect()
    }

    fn len(&self) -> usize {
        self.voices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn key(character: &str) -> CharacterVoiceKey {
        CharacterVoiceKey::new(character, "female", "中年", "专业风格")
    }

    #[test]
    fn test_first_writer_wins() {
        let cache = InMemoryCharacterVoiceCache::new();
        assert!(cache.get(&key("Alice")).is_none());

        let first = cache.insert_if_absent(key("Alice"), SeedId::from(2));
        let second = cache.insert_if_absent(key("Alice"), SeedId::from(4));
        assert_eq!(first.seed.as_str(), "2");
        assert_eq!(second.seed.as_str(), "2");
        assert_eq!(second.resolved_at, first.resolved_at);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_differ_by_configuration() {
        let cache = InMemoryCharacterVoiceCache::new();
        cache.insert_if_absent(key("Alice"), SeedId::from(2));
        cache.insert_if_absent(
            CharacterVoiceKey::new("Alice", "female", "年轻", "专业风格"),
            SeedId::from(4),
        );
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.entries().len(), 2);
    }

    #[test]
    fn test_concurrent_inserts_agree() {
        let cache = InMemoryCharacterVoiceCache::new().arc();
        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || cache.insert_if_absent(key("Bob"), SeedId::from(i)).seed)
            })
            .collect();

        let seeds: Vec<SeedId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(seeds.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.get(&key("Bob")).unwrap().seed, seeds[0]);
    }
}
