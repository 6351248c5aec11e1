//! Seed Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("没有可用的种子")]
    NoSeedAvailable,

    #[error("无效的种子标识: {0:?}")]
    InvalidSeedId(String),

    #[error("种子 {seed_id} 数据不完整: {reason}")]
    IncompleteRecord { seed_id: String, reason: String },

    #[error("种子目录解析失败: {0}")]
    CatalogParse(String),
}
