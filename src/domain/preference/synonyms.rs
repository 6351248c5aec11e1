//! 自由文本偏好 → 特征标签 同义词表

use std::collections::HashMap;

/// 同义词表
///
/// 未收录的偏好按字面当作单个特征标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// 展开偏好为待匹配的特征标签
    pub fn expand(&self, preference: &str) -> Vec<String> {
        let preference = preference.trim();
        match self.entries.get(preference) {
            Some(labels) if !labels.is_empty() => labels.clone(),
            _ => vec![preference.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    ("温柔", &["温柔", "亲切"]),
    ("成熟", &["成熟", "浑厚"]),
    ("年轻", &["青年", "时尚"]),
    ("专业", &["知性", "专业"]),
    ("亲切", &["亲切", "温柔"]),
    ("时尚", &["时尚", "年轻"]),
    ("浑厚", &["浑厚", "成熟"]),
    ("知性", &["知性", "成熟"]),
    ("东北", &["东北"]),
    ("译制腔", &["译制腔"]),
    ("普通", &["普通"]),
];

/// 默认同义词
pub fn default_synonyms() -> HashMap<String, Vec<String>> {
    DEFAULT_SYNONYMS
        .iter()
        .map(|(key, labels)| {
            (
                key.to_string(),
                labels.iter().map(|l| l.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(default_synonyms())
    }
}
