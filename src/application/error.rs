//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::domain::seed::SeedError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 目录为空，无法选出任何种子
    #[error("No seed available")]
    NoSeedAvailable,

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<SeedError> for ApplicationError {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::NoSeedAvailable => Self::NoSeedAvailable,
            SeedError::InvalidSeedId(id) => Self::validation(format!("invalid seed id: {:?}", id)),
            other => Self::internal(other.to_string()),
        }
    }
}
