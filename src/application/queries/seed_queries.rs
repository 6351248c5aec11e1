//! Seed Queries

use crate::domain::preference::PreferenceQuery;

/// 选出最佳种子；带角色名时结果写入角色缓存
#[derive(Debug, Clone, Default)]
pub struct SelectBestSeed {
    pub query: PreferenceQuery,
}

/// 推荐前 N 个种子
#[derive(Debug, Clone, Default)]
pub struct RecommendSeeds {
    pub query: PreferenceQuery,
    /// 缺省时使用配置值
    pub top_n: Option<usize>,
}

/// 性别 / 年龄 / 特征 速查表
#[derive(Debug, Clone)]
pub struct GetCatalogMapping;
