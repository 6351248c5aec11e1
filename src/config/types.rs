//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::preference::default_synonyms;
use crate::domain::style::{
    default_age_aliases, default_gender_aliases, default_personality_styles,
};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 目录文件
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 选种策略
    #[serde(default)]
    pub selection: SelectionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 目录文件配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// 种子目录，`.json` 扩展名按 JSON 解析，其余按文本解析
    #[serde(default = "default_seed_file")]
    pub seed_file: PathBuf,

    /// 风格目录（JSON）
    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,
}

fn default_seed_file() -> PathBuf {
    PathBuf::from("data/seed_id.txt")
}

fn default_preferences_file() -> PathBuf {
    PathBuf::from("data/voice_preferences.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
            preferences_file: default_preferences_file(),
        }
    }
}

/// 选种策略配置
///
/// 表类字段整表替换，不与默认值逐项合并
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionConfig {
    /// 未指定年龄时使用
    #[serde(default = "default_age")]
    pub default_age: String,

    /// 未指定风格时使用
    #[serde(default = "default_style")]
    pub default_style: String,

    /// 性别不在 default_seeds 中时的最终种子
    #[serde(default = "default_fallback_seed")]
    pub fallback_seed: String,

    /// 性别 → 固定默认种子
    #[serde(default = "default_seeds")]
    pub default_seeds: HashMap<String, String>,

    /// 自由文本偏好 → 特征标签
    #[serde(default = "default_synonyms")]
    pub synonyms: HashMap<String, Vec<String>>,

    /// 英文性格 → 风格名
    #[serde(default = "default_personality_styles")]
    pub personality_styles: HashMap<String, String>,

    /// 英文年龄 → 目录年龄
    #[serde(default = "default_age_aliases")]
    pub age_aliases: HashMap<String, String>,

    /// 显示性别 → 性别键
    #[serde(default = "default_gender_aliases")]
    pub gender_aliases: HashMap<String, String>,

    /// 推荐接口默认返回条数
    #[serde(default = "default_recommend_top_n")]
    pub recommend_top_n: usize,

    /// 随机源种子，未设置时取系统熵
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_age() -> String {
    "中年".to_string()
}

fn default_style() -> String {
    "专业风格".to_string()
}

fn default_fallback_seed() -> String {
    "1111".to_string()
}

fn default_seeds() -> HashMap<String, String> {
    [("female", "1111"), ("女", "1111"), ("male", "666"), ("男", "666")]
        .into_iter()
        .map(|(gender, seed)| (gender.to_string(), seed.to_string()))
        .collect()
}

fn default_recommend_top_n() -> usize {
    5
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_age: default_age(),
            default_style: default_style(),
            fallback_seed: default_fallback_seed(),
            default_seeds: default_seeds(),
            synonyms: default_synonyms(),
            personality_styles: default_personality_styles(),
            age_aliases: default_age_aliases(),
            gender_aliases: default_gender_aliases(),
            recommend_top_n: default_recommend_top_n(),
            rng_seed: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
