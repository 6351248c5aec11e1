//! Seed Context - 种子目录限界上下文
//!
//! 职责:
//! - 种子目录解析（文本 / JSON）
//! - SeedRecord 元数据
//! - 内置默认目录

mod errors;
mod fallback;
mod mapping;
mod parser;
mod record;
mod value_objects;

pub use errors::SeedError;
pub use fallback::fallback_catalog;
pub use mapping::{build_catalog_mapping, CatalogMapping, MappingEntry};
pub use parser::{
    parse_catalog_json, parse_catalog_text, parse_pairs, ParsedCatalog, AGE_LABELS,
    FEATURE_LABELS, GENDER_LABELS, QUALITY_FIELD_COUNT, SEED_MARKER,
};
pub use record::SeedRecord;
pub use value_objects::{Distribution, Feature, RankScores, SeedId};
