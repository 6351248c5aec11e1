//! 标签归一化
//!
//! 在计算缓存键之前把前端传入的性别、年龄与风格统一成目录里的写法

use std::collections::HashMap;

/// 风格名后缀
pub const STYLE_SUFFIX: &str = "风格";

const DEFAULT_GENDER_ALIASES: &[(&str, &str)] = &[("男性", "male"), ("女性", "female")];

const DEFAULT_AGE_ALIASES: &[(&str, &str)] = &[
    ("young", "年轻"),
    ("middle-aged", "中年"),
    ("old", "其他"),
];

const DEFAULT_PERSONALITY_STYLES: &[(&str, &str)] = &[
    ("professional", "专业风格"),
    ("casual", "温柔风格"),
    ("energetic", "情感风格"),
    ("calm", "平静风格"),
    ("deep", "深情风格"),
    ("emotional", "情感风格"),
    ("literary", "文学风格"),
    ("gentle", "温柔风格"),
    ("clear", "清澈风格"),
    ("peaceful", "平静风格"),
    ("serious", "深沉风格"),
    ("hongkong", "港式风格"),
];

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn default_gender_aliases() -> HashMap<String, String> {
    to_map(DEFAULT_GENDER_ALIASES)
}

pub fn default_age_aliases() -> HashMap<String, String> {
    to_map(DEFAULT_AGE_ALIASES)
}

pub fn default_personality_styles() -> HashMap<String, String> {
    to_map(DEFAULT_PERSONALITY_STYLES)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 查表，先精确匹配再按小写匹配
fn lookup<'a>(table: &'a HashMap<String, String>, key: &str) -> Option<&'a String> {
    table
        .get(key)
        .or_else(|| table.get(&key.to_lowercase()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelNormalizer {
    gender_aliases: HashMap<String, String>,
    age_aliases: HashMap<String, String>,
    personality_styles: HashMap<String, String>,
}

impl LabelNormalizer {
    pub fn new(
        gender_aliases: HashMap<String, String>,
        age_aliases: HashMap<String, String>,
        personality_styles: HashMap<String, String>,
    ) -> Self {
        Self {
            gender_aliases,
            age_aliases,
            personality_styles,
        }
    }

    /// 空白视为未指定；未收录的写法原样保留
    pub fn gender(&self, gender: Option<&str>) -> Option<String> {
        non_blank(gender).map(|g| {
            lookup(&self.gender_aliases, g)
                .cloned()
                .unwrap_or_else(|| g.to_string())
        })
    }

    pub fn age(&self, age: Option<&str>, default_age: &str) -> String {
        self.age_label(age).unwrap_or_else(|| default_age.to_string())
    }

    /// 不带默认值的年龄归一化
    pub fn age_label(&self, age: Option<&str>) -> Option<String> {
        non_blank(age).map(|a| {
            lookup(&self.age_aliases, a)
                .cloned()
                .unwrap_or_else(|| a.to_string())
        })
    }

    pub fn style(&self, style: Option<&str>, default_style: &str) -> String {
        self.style_label(style)
            .unwrap_or_else(|| default_style.to_string())
    }

    /// 含“风格”的值直接使用，否则查性格映射
    pub fn style_label(&self, style: Option<&str>) -> Option<String> {
        non_blank(style).map(|s| {
            if s.contains(STYLE_SUFFIX) {
                return s.to_string();
            }
            lookup(&self.personality_styles, s)
                .cloned()
                .unwrap_or_else(|| s.to_string())
        })
    }

    /// 性别键的显示名：别名表反查，找不到时返回键本身
    pub fn gender_display(&self, gender: &str) -> String {
        self.gender_aliases
            .iter()
            .filter(|(_, key)| key.as_str() == gender)
            .map(|(display, _)| display)
            .min()
            .cloned()
            .unwrap_or_else(|| gender.to_string())
    }
}

impl Default for LabelNormalizer {
    fn default() -> Self {
        Self::new(
            default_gender_aliases(),
            default_age_aliases(),
            default_personality_styles(),
        )
    }
}
