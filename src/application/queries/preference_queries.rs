//! Voice Preference Queries

/// 前端组合视图
#[derive(Debug, Clone)]
pub struct GetVoicePreferences;

/// 按性别（必填）、年龄、风格筛选候选音色
#[derive(Debug, Clone, Default)]
pub struct GetVoiceCandidates {
    pub gender: String,
    pub age: Option<String>,
    pub style: Option<String>,
}

/// 某性别下所有 (年龄, 风格) 组合
#[derive(Debug, Clone)]
pub struct GetAgeStyleCombinations {
    pub gender: String,
}
