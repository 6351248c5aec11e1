//! 风格目录
//!
//! 文档结构:
//! - `声音偏好`: 风格名 → `{description, <性别>: {<年龄>: {seed, description}}}`
//! - `性别选项` / `年龄选项`: 键 → 显示名
//! - `种子对照表`: 种子 → `{gender, age, style, description}`，缺省时由风格叶子推导

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

use crate::domain::seed::SeedId;

use super::StyleError;

pub const STYLES_KEY: &str = "声音偏好";
pub const GENDER_OPTIONS_KEY: &str = "性别选项";
pub const AGE_OPTIONS_KEY: &str = "年龄选项";
pub const SEED_INDEX_KEY: &str = "种子对照表";
const DESCRIPTION_KEY: &str = "description";

/// 风格下某个 (性别, 年龄) 的音色
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleLeaf {
    pub gender: String,
    pub age: String,
    pub seed: SeedId,
    pub description: String,
}

/// 命名风格
///
/// 不变量: 每个 (性别, 年龄) 最多对应一个种子
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDefinition {
    name: String,
    description: String,
    voices: Vec<StyleLeaf>,
}

impl StyleDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            voices: Vec::new(),
        }
    }

    pub fn add_voice(&mut self, leaf: StyleLeaf) -> Result<(), StyleError> {
        if self.voice(&leaf.gender, &leaf.age).is_some() {
            return Err(StyleError::DuplicateVoice {
                style: self.name.clone(),
                gender: leaf.gender,
                age: leaf.age,
            });
        }
        self.voices.push(leaf);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn voices(&self) -> &[StyleLeaf] {
        &self.voices
    }

    pub fn voice(&self, gender: &str, age: &str) -> Option<&StyleLeaf> {
        self.voices
            .iter()
            .find(|v| v.gender == gender && v.age == age)
    }
}

/// 种子对照表条目：种子 → (性别, 年龄, 风格)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedIndexEntry {
    pub seed: SeedId,
    pub gender: String,
    pub age: String,
    pub style: String,
    #[serde(default)]
    pub description: String,
}

impl SeedIndexEntry {
    pub fn matches(&self, gender: &str, age: &str, style: &str) -> bool {
        self.gender == gender && self.age == age && self.style == style
    }
}

/// 风格目录
#[derive(Debug, Clone, PartialEq)]
pub struct VoicePreferences {
    styles: Vec<StyleDefinition>,
    gender_options: BTreeMap<String, String>,
    age_options: BTreeMap<String, String>,
    seed_index: Vec<SeedIndexEntry>,
}

#[derive(Deserialize)]
struct LeafDto {
    seed: SeedId,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct IndexInfoDto {
    gender: String,
    age: String,
    style: String,
    #[serde(default)]
    description: String,
}

impl VoicePreferences {
    pub fn new(
        styles: Vec<StyleDefinition>,
        gender_options: BTreeMap<String, String>,
        age_options: BTreeMap<String, String>,
        seed_index: Vec<SeedIndexEntry>,
    ) -> Self {
        Self {
            styles,
            gender_options,
            age_options,
            seed_index,
        }
    }

    /// 从 JSON 文本解析
    ///
    /// 语法错误或顶层不是对象时返回错误；单个畸形条目只告警并跳过
    pub fn from_json_str(text: &str) -> Result<Self, StyleError> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| StyleError::InvalidDocument(e.to_string()))?;
        let root = root
            .as_object()
            .ok_or_else(|| StyleError::InvalidDocument("顶层必须是 JSON 对象".to_string()))?;

        let styles: Vec<StyleDefinition> = match root.get(STYLES_KEY).and_then(Value::as_object) {
            Some(map) => map
                .iter()
                .filter_map(|(name, data)| parse_style(name, data))
                .collect(),
            None => {
                tracing::warn!("Voice preferences document has no '{}' section", STYLES_KEY);
                Vec::new()
            }
        };

        let seed_index = match root.get(SEED_INDEX_KEY).and_then(Value::as_object) {
            Some(map) => parse_seed_index(map),
            None => derive_seed_index(&styles),
        };

        Ok(Self::new(
            styles,
            parse_options(root.get(GENDER_OPTIONS_KEY)),
            parse_options(root.get(AGE_OPTIONS_KEY)),
            seed_index,
        ))
    }

    /// 内置默认风格目录（六种风格）
    pub fn fallback() -> Self {
        let styles = vec![
            style("文学风格", "知性文雅，适合朗读文学作品", &[("male", "年轻", 111, "年轻男性 - 文学气质")]),
            style(
                "温柔风格",
                "温和柔软，亲切自然",
                &[
                    ("male", "年轻", 333, "年轻男性 - 温柔体贴"),
                    ("female", "年轻", 2, "年轻女性 - 情感丰富温柔"),
                ],
            ),
            style(
                "专业风格",
                "专业稳重，适合正式场合",
                &[
                    ("male", "中年", 666, "中年男性 - 白领专业"),
                    ("female", "中年", 1111, "中年女性 - 专业清晰"),
                ],
            ),
            style("情感风格", "情感丰富，表现力强", &[("female", "年轻", 2, "年轻女性 - 情感丰富")]),
            style("深情风格", "深情动人，温暖感人", &[("female", "中年", 4, "中年女性 - 深情动人")]),
            style("平静风格", "平静宁静，安详舒适", &[("female", "中年", 3333, "中年女性 - 平静宁静")]),
        ];
        let seed_index = derive_seed_index(&styles);
        Self::new(styles, BTreeMap::new(), BTreeMap::new(), seed_index)
    }

    pub fn styles(&self) -> &[StyleDefinition] {
        &self.styles
    }

    pub fn style(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn gender_options(&self) -> &BTreeMap<String, String> {
        &self.gender_options
    }

    pub fn age_options(&self) -> &BTreeMap<String, String> {
        &self.age_options
    }

    pub fn seed_index(&self) -> &[SeedIndexEntry] {
        &self.seed_index
    }

    pub fn gender_display<'a>(&'a self, gender: &'a str) -> &'a str {
        self.gender_options
            .get(gender)
            .map(String::as_str)
            .unwrap_or(gender)
    }

    pub fn age_display<'a>(&'a self, age: &'a str) -> &'a str {
        self.age_options.get(age).map(String::as_str).unwrap_or(age)
    }

    /// 对照表中首个该种子的描述
    pub fn describe(&self, seed: &SeedId) -> Option<&str> {
        self.seed_index
            .iter()
            .find(|e| &e.seed == seed)
            .map(|e| e.description.as_str())
    }

    /// 对照表中不同种子的数量
    pub fn distinct_seed_count(&self) -> usize {
        self.seed_index
            .iter()
            .map(|e| &e.seed)
            .collect::<HashSet<_>>()
            .len()
    }
}

fn style(name: &str, description: &str, voices: &[(&str, &str, u64, &str)]) -> StyleDefinition {
    StyleDefinition {
        name: name.to_string(),
        description: description.to_string(),
        voices: voices
            .iter()
            .map(|(gender, age, seed, desc)| StyleLeaf {
                gender: gender.to_string(),
                age: age.to_string(),
                seed: SeedId::from(*seed),
                description: desc.to_string(),
            })
            .collect(),
    }
}

fn parse_style(name: &str, data: &Value) -> Option<StyleDefinition> {
    let Some(object) = data.as_object() else {
        tracing::warn!(style = %name, "Style entry is not an object, skipping");
        return None;
    };

    let description = object
        .get(DESCRIPTION_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mut definition = StyleDefinition::new(name, description);

    for (gender, ages) in object.iter().filter(|(k, _)| k.as_str() != DESCRIPTION_KEY) {
        let Some(ages) = ages.as_object() else {
            tracing::warn!(style = %name, gender = %gender, "Gender entry is not an object, skipping");
            continue;
        };

        for (age, leaf) in ages {
            let leaf = match LeafDto::deserialize(leaf) {
                Ok(leaf) => leaf,
                Err(e) => {
                    tracing::warn!(
                        style = %name,
                        gender = %gender,
                        age = %age,
                        "Malformed voice entry, skipping: {}",
                        e
                    );
                    continue;
                }
            };

            if let Err(e) = definition.add_voice(StyleLeaf {
                gender: gender.clone(),
                age: age.clone(),
                seed: leaf.seed,
                description: leaf.description,
            }) {
                tracing::warn!("{}", e);
            }
        }
    }

    Some(definition)
}

fn parse_seed_index(map: &Map<String, Value>) -> Vec<SeedIndexEntry> {
    map.iter()
        .filter_map(|(seed, info)| {
            let seed = match SeedId::new(seed.as_str()) {
                Ok(seed) => seed,
                Err(e) => {
                    tracing::warn!("Skipping seed index entry: {}", e);
                    return None;
                }
            };
            match IndexInfoDto::deserialize(info) {
                Ok(info) => Some(SeedIndexEntry {
                    seed,
                    gender: info.gender,
                    age: info.age,
                    style: info.style,
                    description: info.description,
                }),
                Err(e) => {
                    tracing::warn!(seed_id = %seed, "Malformed seed index entry, skipping: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// 按风格顺序展开所有叶子；同一种子可服务多个风格
fn derive_seed_index(styles: &[StyleDefinition]) -> Vec<SeedIndexEntry> {
    styles
        .iter()
        .flat_map(|style| {
            style.voices.iter().map(move |leaf| SeedIndexEntry {
                seed: leaf.seed.clone(),
                gender: leaf.gender.clone(),
                age: leaf.age.clone(),
                style: style.name.clone(),
                description: leaf.description.clone(),
            })
        })
        .collect()
}

fn parse_options(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
