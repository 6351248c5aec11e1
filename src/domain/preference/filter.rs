//! 偏好过滤链
//!
//! 过滤阶段依次为：性别 → 年龄 → 特征 → 自由文本偏好。
//! 条件缺失的阶段原样透传；某阶段会把候选集过滤为空时跳过该阶段，
//! 沿用上一阶段的结果。过滤只会收窄候选集，不会清空它。

use crate::domain::seed::SeedRecord;

use super::{PreferenceQuery, SynonymTable};

/// 性别占比须严格大于此值
pub const GENDER_SHARE_THRESHOLD: f64 = 0.3;
/// 年龄段占比须严格大于此值
pub const AGE_SHARE_THRESHOLD: f64 = 0.2;

/// 过滤阶段
pub trait SeedFilter {
    /// 阶段名（用于日志）
    fn name(&self) -> &'static str;

    /// 条件缺失时为 false，整个阶段透传
    fn is_active(&self) -> bool;

    fn matches(&self, record: &SeedRecord) -> bool;
}

/// 性别过滤
#[derive(Debug, Clone)]
pub struct GenderFilter {
    gender: Option<String>,
}

impl GenderFilter {
    pub fn new(gender: Option<String>) -> Self {
        Self { gender }
    }
}

impl SeedFilter for GenderFilter {
    fn name(&self) -> &'static str {
        "gender"
    }

    fn is_active(&self) -> bool {
        self.gender.is_some()
    }

    fn matches(&self, record: &SeedRecord) -> bool {
        self.gender
            .as_deref()
            .is_some_and(|g| record.gender().exceeds(g, GENDER_SHARE_THRESHOLD))
    }
}

/// 年龄过滤
#[derive(Debug, Clone)]
pub struct AgeFilter {
    age: Option<String>,
}

impl AgeFilter {
    pub fn new(age: Option<String>) -> Self {
        Self { age }
    }
}

impl SeedFilter for AgeFilter {
    fn name(&self) -> &'static str {
        "age"
    }

    fn is_active(&self) -> bool {
        self.age.is_some()
    }

    fn matches(&self, record: &SeedRecord) -> bool {
        self.age
            .as_deref()
            .is_some_and(|a| record.age().exceeds(a, AGE_SHARE_THRESHOLD))
    }
}

/// 特征过滤：特征标签集合与目标标签有交集即保留
#[derive(Debug, Clone)]
pub struct FeatureFilter {
    name: &'static str,
    labels: Vec<String>,
}

impl FeatureFilter {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            name: "features",
            labels,
        }
    }

    /// 自由文本偏好经同义词表展开后按特征过滤
    pub fn from_preference(preference: Option<&str>, synonyms: &SynonymTable) -> Self {
        Self {
            name: "voice_preference",
            labels: preference.map(|p| synonyms.expand(p)).unwrap_or_default(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl SeedFilter for FeatureFilter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_active(&self) -> bool {
        !self.labels.is_empty()
    }

    fn matches(&self, record: &SeedRecord) -> bool {
        record.has_any_feature(&self.labels)
    }
}

/// 过滤链
pub struct FilterChain {
    stages: Vec<Box<dyn SeedFilter + Send + Sync>>,
}

impl FilterChain {
    pub fn new(stages: Vec<Box<dyn SeedFilter + Send + Sync>>) -> Self {
        Self { stages }
    }

    /// 按查询构建标准四阶段过滤链
    pub fn for_query(query: &PreferenceQuery, synonyms: &SynonymTable) -> Self {
        Self::new(vec![
            Box::new(GenderFilter::new(query.gender.clone())),
            Box::new(AgeFilter::new(query.age.clone())),
            Box::new(FeatureFilter::new(query.features.clone())),
            Box::new(FeatureFilter::from_preference(
                query.voice_preference.as_deref(),
                synonyms,
            )),
        ])
    }

    /// 依次执行各阶段，保持目录原有顺序
    ///
    /// 仅当输入为空时结果为空
    pub fn apply<'r>(&self, records: &'r [SeedRecord]) -> Vec<&'r SeedRecord> {
        let mut candidates: Vec<&SeedRecord> = records.iter().collect();

        for stage in self.stages.iter().filter(|s| s.is_active()) {
            let narrowed: Vec<&SeedRecord> = candidates
                .iter()
                .copied()
                .filter(|record| stage.matches(record))
                .collect();

            if narrowed.is_empty() {
                tracing::warn!(
                    stage = stage.name(),
                    candidates = candidates.len(),
                    "Filter stage would eliminate every candidate, skipping it"
                );
            } else {
                tracing::debug!(
                    stage = stage.name(),
                    before = candidates.len(),
                    after = narrowed.len(),
                    "Filter stage applied"
                );
                candidates = narrowed;
            }
        }

        candidates
    }
}

/// 便捷函数：按查询过滤目录
pub fn filter<'r>(
    records: &'r [SeedRecord],
    query: &PreferenceQuery,
    synonyms: &SynonymTable,
) -> Vec<&'r SeedRecord> {
    FilterChain::for_query(query, synonyms).apply(records)
}
