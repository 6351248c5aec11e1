//! 性别 / 年龄 / 特征 → 种子 的速查表

use serde::Serialize;
use std::collections::BTreeMap;

use super::{SeedId, SeedRecord};

/// 只收录主要性别
pub const GENDER_MAPPING_THRESHOLD: f64 = 0.5;
/// 只收录显著年龄段
pub const AGE_MAPPING_THRESHOLD: f64 = 0.3;
/// 只收录显著特征
pub const FEATURE_MAPPING_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Serialize)]
pub struct MappingEntry {
    pub seed_id: SeedId,
    pub rank_multi: f64,
    pub primary_gender: Option<String>,
    pub primary_age: Option<String>,
    pub primary_features: Vec<String>,
}

impl MappingEntry {
    fn from_record(record: &SeedRecord) -> Self {
        Self {
            seed_id: record.id().clone(),
            rank_multi: record.rank_multi(),
            primary_gender: record.primary_gender().map(str::to_string),
            primary_age: record.primary_age().map(str::to_string),
            primary_features: record.top_features(3).into_iter().map(str::to_string).collect(),
        }
    }
}

/// 每个出现过的标签都有一个键，即使没有种子超过阈值
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogMapping {
    pub gender_mapping: BTreeMap<String, Vec<MappingEntry>>,
    pub age_mapping: BTreeMap<String, Vec<MappingEntry>>,
    pub feature_mapping: BTreeMap<String, Vec<MappingEntry>>,
}

fn add(
    table: &mut BTreeMap<String, Vec<MappingEntry>>,
    label: &str,
    share: f64,
    threshold: f64,
    record: &SeedRecord,
) {
    let bucket = table.entry(label.to_string()).or_default();
    if share > threshold {
        bucket.push(MappingEntry::from_record(record));
    }
}

fn sort_by_rank(table: &mut BTreeMap<String, Vec<MappingEntry>>) {
    for entries in table.values_mut() {
        entries.sort_by(|a, b| b.rank_multi.total_cmp(&a.rank_multi));
    }
}

/// 构建速查表，每个列表按 rank_multi 降序
pub fn build_catalog_mapping(records: &[SeedRecord]) -> CatalogMapping {
    let mut mapping = CatalogMapping::default();

    for record in records {
        for (label, share) in record.gender().iter() {
            add(&mut mapping.gender_mapping, label, share, GENDER_MAPPING_THRESHOLD, record);
        }
        for (label, share) in record.age().iter() {
            add(&mut mapping.age_mapping, label, share, AGE_MAPPING_THRESHOLD, record);
        }
        for feature in record.features() {
            add(
                &mut mapping.feature_mapping,
                &feature.label,
                feature.weight,
                FEATURE_MAPPING_THRESHOLD,
                record,
            );
        }
    }

    sort_by_rank(&mut mapping.gender_mapping);
    sort_by_rank(&mut mapping.age_mapping);
    sort_by_rank(&mut mapping.feature_mapping);
    mapping
}
