//! 选种所需的只读数据与策略
//!
//! 两者在启动时构建一次，之后由各 handler 通过 `Arc` 共享

use std::collections::HashMap;

use crate::domain::preference::SynonymTable;
use crate::domain::seed::{SeedId, SeedRecord};
use crate::domain::style::{FallbackSeeds, LabelNormalizer, VoicePreferences};

/// 种子目录 + 风格目录
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    records: Vec<SeedRecord>,
    preferences: VoicePreferences,
}

impl VoiceCatalog {
    pub fn new(records: Vec<SeedRecord>, preferences: VoicePreferences) -> Self {
        Self {
            records,
            preferences,
        }
    }

    pub fn records(&self) -> &[SeedRecord] {
        &self.records
    }

    pub fn preferences(&self) -> &VoicePreferences {
        &self.preferences
    }

    pub fn find_record(&self, seed: &SeedId) -> Option<&SeedRecord> {
        self.records.iter().find(|r| r.id() == seed)
    }
}

/// 选种策略
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    pub synonyms: SynonymTable,
    pub normalizer: LabelNormalizer,
    pub fallback_seeds: FallbackSeeds,
    pub default_age: String,
    pub default_style: String,
    pub recommend_top_n: usize,
}

impl SelectionPolicy {
    /// 性别显示名：风格目录的性别选项优先，其次别名表反查
    pub fn gender_display(&self, catalog: &VoiceCatalog, gender: &str) -> String {
        match catalog.preferences().gender_options().get(gender) {
            Some(display) => display.clone(),
            None => self.normalizer.gender_display(gender),
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        let by_gender: HashMap<String, SeedId> = [
            ("female", 1111),
            ("女", 1111),
            ("male", 666),
            ("男", 666),
        ]
        .into_iter()
        .map(|(gender, seed)| (gender.to_string(), SeedId::from(seed)))
        .collect();

        Self {
            synonyms: SynonymTable::default(),
            normalizer: LabelNormalizer::default(),
            fallback_seeds: FallbackSeeds::new(by_gender, SeedId::from(1111)),
            default_age: "中年".to_string(),
            default_style: "专业风格".to_string(),
            recommend_top_n: 5,
        }
    }
}
