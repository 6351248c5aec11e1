//! Character Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CachedVoice, CharacterVoiceCachePort};
use crate::application::queries::ListCharacterVoices;

/// ListCharacterVoices Handler
pub struct ListCharacterVoicesHandler {
    cache: Arc<dyn CharacterVoiceCachePort>,
}

impl ListCharacterVoicesHandler {
    pub fn new(cache: Arc<dyn CharacterVoiceCachePort>) -> Self {
        Self { cache }
    }

    /// 按缓存键（角色名优先）排序
    pub fn handle(&self, _query: ListCharacterVoices) -> Result<Vec<CachedVoice>, ApplicationError> {
        let mut entries = self.cache.entries();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}
