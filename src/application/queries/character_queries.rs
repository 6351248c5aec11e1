//! Character Queries

/// 列出已缓存的角色音色
#[derive(Debug, Clone)]
pub struct ListCharacterVoices;
