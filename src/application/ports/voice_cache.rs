//! Character Voice Cache Port - 角色音色缓存
//!
//! 同一角色配置在进程生命周期内只对应一个种子，具体实现在 infrastructure/memory 层

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::seed::SeedId;

/// 键的来源：精确匹配解析与排序选种各占一个命名空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceKeyScope {
    /// ResolveSeed：style 为风格名
    Resolved,
    /// SelectBestSeed：style 为自由文本偏好
    Ranked,
}

/// 缓存键：角色名 + 归一化后的性别、年龄、风格
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterVoiceKey {
    pub character: String,
    pub gender: String,
    pub age: String,
    pub style: String,
    pub scope: VoiceKeyScope,
}

impl CharacterVoiceKey {
    pub fn new(
        character: impl Into<String>,
        gender: impl Into<String>,
        age: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            character: character.into(),
            gender: gender.into(),
            age: age.into(),
            style: style.into(),
            scope: VoiceKeyScope::Resolved,
        }
    }

    /// 排序选种路径的键
    pub fn ranked(
        character: impl Into<String>,
        gender: impl Into<String>,
        age: impl Into<String>,
        preference: impl Into<String>,
    ) -> Self {
        Self {
            scope: VoiceKeyScope::Ranked,
            ..Self::new(character, gender, age, preference)
        }
    }
}

impl fmt::Display for CharacterVoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope == VoiceKeyScope::Ranked {
            f.write_str("ranked:")?;
        }
        write!(
            f,
            "{}_{}_{}_{}",
            self.character, self.gender, self.age, self.style
        )
    }
}

/// 缓存条目
#[derive(Debug, Clone, PartialEq)]
pub struct CachedVoice {
    pub key: CharacterVoiceKey,
    pub seed: SeedId,
    pub resolved_at: DateTime<Utc>,
}

/// Character Voice Cache Port
///
/// 条目只增不删；并发首次写入时先写入者胜出
pub trait CharacterVoiceCachePort: Send + Sync {
    fn get(&self, key: &CharacterVoiceKey) -> Option<CachedVoice>;

    /// 键不存在时写入；返回最终存储的条目（可能是其他调用者先写入的）
    fn insert_if_absent(&self, key: CharacterVoiceKey, seed: SeedId) -> CachedVoice;

    /// 所有条目（无序）
    fn entries(&self) -> Vec<CachedVoice>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_do_not_collide() {
        let resolved = CharacterVoiceKey::new("林黛玉", "female", "中年", "温柔");
        let ranked = CharacterVoiceKey::ranked("林黛玉", "female", "中年", "温柔");
        assert_ne!(resolved, ranked);
        assert_eq!(resolved.to_string(), "林黛玉_female_中年_温柔");
        assert_eq!(ranked.to_string(), "ranked:林黛玉_female_中年_温柔");
    }
}
