//! Preference Context - 偏好匹配限界上下文
//!
//! 职责:
//! - 偏好查询
//! - 同义词展开
//! - 过滤链（逐级收窄，不会清空）
//! - 按 rank_multi 排序选种

mod filter;
mod query;
mod ranker;
mod synonyms;

pub use filter::{
    filter, AgeFilter, FeatureFilter, FilterChain, GenderFilter, SeedFilter,
    AGE_SHARE_THRESHOLD, GENDER_SHARE_THRESHOLD,
};
pub use query::PreferenceQuery;
pub use ranker::{recommend, select};
pub use synonyms::{default_synonyms, SynonymTable};
