//! 精确匹配选种
//!
//! 三级回退，每一级都是可观察的行为:
//! 1. 对照表中 (性别, 年龄, 风格) 完全一致的条目，等概率随机选一个
//! 2. 对照表中首个性别一致的条目
//! 3. 按性别配置的固定默认种子

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::seed::SeedId;

use super::{SeedIndexEntry, VoicePreferences};

/// 固定默认种子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSeeds {
    by_gender: HashMap<String, SeedId>,
    default: SeedId,
}

impl FallbackSeeds {
    pub fn new(by_gender: HashMap<String, SeedId>, default: SeedId) -> Self {
        Self { by_gender, default }
    }

    /// 先精确查找，再按小写查找，最后使用全局默认
    pub fn for_gender(&self, gender: &str) -> &SeedId {
        self.by_gender
            .get(gender)
            .or_else(|| self.by_gender.get(&gender.to_lowercase()))
            .unwrap_or(&self.default)
    }

    pub fn default_seed(&self) -> &SeedId {
        &self.default
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum ResolutionTier {
    ExactMatch { candidates: usize },
    GenderOnly,
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub seed: SeedId,
    pub description: Option<String>,
    pub tier: ResolutionTier,
}

/// 对照表中完全一致的条目，保持对照表顺序
pub fn exact_matches<'p>(
    index: &'p [SeedIndexEntry],
    gender: &str,
    age: &str,
    style: &str,
) -> Vec<&'p SeedIndexEntry> {
    index
        .iter()
        .filter(|e| e.matches(gender, age, style))
        .collect()
}

/// 按三级回退解析种子
///
/// `pick` 接收候选数量，返回所选下标；只在第一级有多个候选时影响结果
pub fn resolve_exact<F>(
    preferences: &VoicePreferences,
    gender: &str,
    age: &str,
    style: &str,
    fallback: &FallbackSeeds,
    pick: F,
) -> Resolution
where
    F: FnOnce(usize) -> usize,
{
    let index = preferences.seed_index();

    let candidates = exact_matches(index, gender, age, style);
    if !candidates.is_empty() {
        let chosen = candidates[pick(candidates.len()).min(candidates.len() - 1)];
        tracing::info!(
            seed_id = %chosen.seed,
            candidates = candidates.len(),
            "Exact match for {}/{}/{}",
            gender,
            age,
            style
        );
        return Resolution {
            seed: chosen.seed.clone(),
            description: Some(chosen.description.clone()),
            tier: ResolutionTier::ExactMatch {
                candidates: candidates.len(),
            },
        };
    }

    tracing::warn!("No exact match for {}/{}/{}", gender, age, style);

    if let Some(entry) = index.iter().find(|e| e.gender == gender) {
        tracing::info!(seed_id = %entry.seed, "Falling back to first seed with gender {}", gender);
        return Resolution {
            seed: entry.seed.clone(),
            description: Some(entry.description.clone()),
            tier: ResolutionTier::GenderOnly,
        };
    }

    let seed = fallback.for_gender(gender).clone();
    tracing::warn!(seed_id = %seed, "Falling back to default seed for gender {}", gender);
    Resolution {
        description: preferences.describe(&seed).map(str::to_string),
        seed,
        tier: ResolutionTier::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry(seed: u64, gender: &str, age: &str, style: &str) -> SeedIndexEntry {
        SeedIndexEntry {
            seed: SeedId::from(seed),
            gender: gender.to_string(),
            age: age.to_string(),
            style: style.to_string(),
            description: format!("{} {} {}", gender, age, style),
        }
    }

    fn preferences(index: Vec<SeedIndexEntry>) -> VoicePreferences {
        VoicePreferences::new(Vec::new(), BTreeMap::new(), BTreeMap::new(), index)
    }

    fn fallback() -> FallbackSeeds {
        let mut by_gender = HashMap::new();
        by_gender.insert("female".to_string(), SeedId::from(1111));
        by_gender.insert("女".to_string(), SeedId::from(1111));
        by_gender.insert("male".to_string(), SeedId::from(666));
        FallbackSeeds::new(by_gender, SeedId::from(1111))
    }

    #[test]
    fn test_single_exact_match_always_wins() {
        let prefs = preferences(vec![
            entry(5, "女", "中年", "温柔风格"),
            entry(7, "女", "青年", "温柔风格"),
            entry(9, "男", "青年", "温柔风格"),
        ]);
        for i in 0..5 {
            let r = resolve_exact(&prefs, "女", "青年", "温柔风格", &fallback(), |_| i);
            assert_eq!(r.seed.as_str(), "7");
            assert_eq!(r.tier, ResolutionTier::ExactMatch { candidates: 1 });
        }
    }

    #[test]
    fn test_picker_chooses_among_exact_matches() {
        let prefs = preferences(vec![
            entry(1, "female", "年轻", "温柔风格"),
            entry(2, "female", "年轻", "温柔风格"),
            entry(3, "female", "年轻", "温柔风格"),
        ]);
        let r = resolve_exact(&prefs, "female", "年轻", "温柔风格", &fallback(), |n| {
            assert_eq!(n, 3);
            2
        });
        assert_eq!(r.seed.as_str(), "3");
    }

    #[test]
    fn test_gender_only_fallback_uses_first_entry() {
        let prefs = preferences(vec![
            entry(9, "男", "中年", "专业风格"),
            entry(12, "女", "中年", "专业风格"),
            entry(4, "女", "青年", "情感风格"),
        ]);
        let r = resolve_exact(&prefs, "女", "老年", "温柔风格", &fallback(), |_| 0);
        assert_eq!(r.seed.as_str(), "12");
        assert_eq!(r.tier, ResolutionTier::GenderOnly);
    }

    #[test]
    fn test_default_seed_per_gender() {
        let prefs = preferences(vec![entry(9, "男", "中年", "专业风格")]);

        let r = resolve_exact(&prefs, "Male", "中年", "专业风格", &fallback(), |_| 0);
        assert_eq!(r.seed.as_str(), "666");
        assert_eq!(r.tier, ResolutionTier::Default);

        let r = resolve_exact(&prefs, "robot", "中年", "专业风格", &fallback(), |_| 0);
        assert_eq!(r.seed.as_str(), "1111");
        assert_eq!(r.description, None);
    }

    #[test]
    fn test_fallback_style_catalog_resolution() {
        let prefs = VoicePreferences::fallback();
        let r = resolve_exact(&prefs, "female", "中年", "专业风格", &fallback(), |_| 0);
        assert_eq!(r.seed.as_str(), "1111");
        assert_eq!(r.description.as_deref(), Some("中年女性 - 专业清晰"));
    }
}
