//! 偏好查询

use serde::Deserialize;

/// 一次选种请求的偏好，所有条件可选
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreferenceQuery {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub voice_preference: Option<String>,
    #[serde(default, alias = "character")]
    pub character_name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PreferenceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_voice_preference(mut self, preference: impl Into<String>) -> Self {
        self.voice_preference = Some(preference.into());
        self
    }

    pub fn with_character(mut self, name: impl Into<String>) -> Self {
        self.character_name = Some(name.into());
        self
    }

    /// 空白字符串视为未设置
    pub fn normalized(self) -> Self {
        Self {
            gender: non_blank(self.gender),
            age: non_blank(self.age),
            features: self
                .features
                .into_iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            voice_preference: non_blank(self.voice_preference),
            character_name: non_blank(self.character_name),
        }
    }
}
