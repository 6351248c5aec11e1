//! Style Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("声音偏好文档无效: {0}")]
    InvalidDocument(String),

    #[error("风格 {style} 中 {gender}/{age} 已有种子")]
    DuplicateVoice {
        style: String,
        gender: String,
        age: String,
    },
}
