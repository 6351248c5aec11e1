//! Seed Context - SeedRecord

use serde::Serialize;

use super::{Distribution, Feature, RankScores, SeedError, SeedId};

/// 一个可合成的音色身份
///
/// 不变量:
/// - 性别分布与年龄分布均非空
/// - features 按权重降序排列（同权重保持目录顺序）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedRecord {
    pub(super) id: SeedId,
    pub(super) ranks: RankScores,
    pub(super) gender: Distribution,
    pub(super) age: Distribution,
    pub(super) features: Vec<Feature>,
}

impl SeedRecord {
    pub fn new(
        id: SeedId,
        ranks: RankScores,
        gender: Distribution,
        age: Distribution,
        mut features: Vec<Feature>,
    ) -> Result<Self, SeedError> {
        if gender.is_empty() {
            return Err(SeedError::IncompleteRecord {
                seed_id: id.to_string(),
                reason: "缺少性别分布".to_string(),
            });
        }
        if age.is_empty() {
            return Err(SeedError::IncompleteRecord {
                seed_id: id.to_string(),
                reason: "缺少年龄分布".to_string(),
            });
        }

        features.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        Ok(Self {
            id,
            ranks,
            gender,
            age,
            features,
        })
    }

    pub fn id(&self) -> &SeedId {
        &self.id
    }

    pub fn ranks(&self) -> &RankScores {
        &self.ranks
    }

    pub fn rank_multi(&self) -> f64 {
        self.ranks.rank_multi
    }

    pub fn gender(&self) -> &Distribution {
        &self.gender
    }

    pub fn age(&self) -> &Distribution {
        &self.age
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_labels(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.label.as_str())
    }

    /// 特征标签集合与给定标签是否有交集
    pub fn has_any_feature<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        self.feature_labels()
            .any(|own| labels.iter().any(|wanted| wanted.as_ref() == own))
    }

    pub fn primary_gender(&self) -> Option<&str> {
        self.gender.primary()
    }

    pub fn primary_age(&self) -> Option<&str> {
        self.age.primary()
    }

    /// 最显著的前 n 个特征
    pub fn top_features(&self, n: usize) -> Vec<&str> {
        self.feature_labels().take(n).collect()
    }

    /// 简短描述，如 "女 青年 亲切/温柔"
    pub fn summary(&self) -> String {
        let features = self.top_features(3).join("/");
        format!(
            "{} {} {}",
            self.primary_gender().unwrap_or("-"),
            self.primary_age().unwrap_or("-"),
            if features.is_empty() { "-" } else { features.as_str() }
        )
    }
}
