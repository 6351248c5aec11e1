//! Seed Context - Value Objects

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

use super::SeedError;

/// 种子唯一标识
///
/// 目录中可能是数字（`1283`）也可能是任意字符串，统一以字符串保存
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SeedId(String);

impl SeedId {
    pub fn new(id: impl Into<String>) -> Result<Self, SeedError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(SeedError::InvalidSeedId(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 数字形式（非数字种子返回 None）
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// 展示顺序：数字种子按数值升序，非数字种子排在其后按字典序
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl From<u64> for SeedId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for SeedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for SeedId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // 风格目录里的 seed 字段既有 111 也有 "111"
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::from(n)),
            Raw::Text(s) => Self::new(s).map_err(serde::de::Error::custom),
        }
    }
}

/// 概率分布（性别 / 年龄段 → 占比）
///
/// 占比取值 [0, 1]，各标签之和约为 1。标签保持目录中的出现顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution(Vec<(String, f64)>);

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// 重复标签以后出现的为准，位置保持首次出现处
    pub fn insert(&mut self, label: impl Into<String>, share: f64) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = share,
            None => self.0.push((label, share)),
        }
    }

    fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, share)| *share)
    }

    /// 标签占比，不存在时为 0
    pub fn share(&self, label: &str) -> f64 {
        self.get(label).unwrap_or(0.0)
    }

    /// 标签占比是否严格大于阈值
    pub fn exceeds(&self, label: &str, threshold: f64) -> bool {
        self.get(label).is_some_and(|share| share > threshold)
    }

    /// 占比最高的标签，并列时取先出现者
    pub fn primary(&self) -> Option<&str> {
        let mut best: Option<(&String, f64)> = None;
        for (label, share) in &self.0 {
            match best {
                Some((_, top)) if *share <= top => {}
                _ => best = Some((label, *share)),
            }
        }
        best.map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, share)| (label.as_str(), *share))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (label, share) in iter {
            dist.insert(label, share);
        }
        dist
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(label, share)| (label, share)))
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of label to share")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Distribution, A::Error> {
                let mut dist = Distribution::new();
                while let Some((label, share)) = map.next_entry::<String, f64>()? {
                    dist.insert(label, share);
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

/// 声音特征及其权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub label: String,
    /// (0, 1]
    pub weight: f64,
}

impl Feature {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// 离线评测得到的质量分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankScores {
    pub rank_long: f64,
    /// 主排序依据
    pub rank_multi: f64,
    pub rank_single: f64,
    pub score: f64,
}

impl RankScores {
    pub fn new(rank_long: f64, rank_multi: f64, rank_single: f64, score: f64) -> Self {
        Self {
            rank_long,
            rank_multi,
            rank_single,
            score,
        }
    }
}
