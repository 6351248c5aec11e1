//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, SelectionConfig};
use crate::application::SelectionPolicy;
use crate::domain::preference::SynonymTable;
use crate::domain::seed::SeedId;
use crate::domain::style::{FallbackSeeds, LabelNormalizer};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SEEDVOX_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SEEDVOX_SERVER__PORT=8080`
/// - `SEEDVOX_CATALOG__SEED_FILE=/data/seed_id.json`
/// - `SEEDVOX_SELECTION__RNG_SEED=42`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），表类字段由 serde 默认值提供
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("catalog.seed_file", "data/seed_id.txt")?
        .set_default("catalog.preferences_file", "data/voice_preferences.json")?
        .set_default("selection.default_age", "中年")?
        .set_default("selection.default_style", "专业风格")?
        .set_default("selection.fallback_seed", "1111")?
        .set_default("selection.recommend_top_n", 5)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），例如 SEEDVOX_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("SEEDVOX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.catalog.seed_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Seed catalog path cannot be empty".to_string(),
        ));
    }

    if config.catalog.preferences_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice preferences path cannot be empty".to_string(),
        ));
    }

    if config.selection.fallback_seed.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Fallback seed cannot be empty".to_string(),
        ));
    }

    if config.selection.recommend_top_n == 0 {
        return Err(ConfigError::ValidationError(
            "recommend_top_n must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

impl SelectionConfig {
    /// 构建运行时选种策略
    pub fn to_policy(&self) -> Result<SelectionPolicy, ConfigError> {
        let fallback = parse_seed("fallback_seed", &self.fallback_seed)?;
        let by_gender = self
            .default_seeds
            .iter()
            .map(|(gender, seed)| {
                parse_seed(&format!("default_seeds.{}", gender), seed)
                    .map(|seed| (gender.clone(), seed))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(SelectionPolicy {
            synonyms: SynonymTable::new(self.synonyms.clone()),
            normalizer: LabelNormalizer::new(
                self.gender_aliases.clone(),
                self.age_aliases.clone(),
                self.personality_styles.clone(),
            ),
            fallback_seeds: FallbackSeeds::new(by_gender, fallback),
            default_age: self.default_age.clone(),
            default_style: self.default_style.clone(),
            recommend_top_n: self.recommend_top_n,
        })
    }
}

fn parse_seed(field: &str, value: &str) -> Result<SeedId, ConfigError> {
    SeedId::new(value)
        .map_err(|e| ConfigError::ValidationError(format!("selection.{}: {}", field, e)))
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Seed Catalog: {:?}", config.catalog.seed_file);
    tracing::info!("Voice Preferences: {:?}", config.catalog.preferences_file);
    tracing::info!(
        "Defaults: age={}, style={}, fallback seed={}",
        config.selection.default_age,
        config.selection.default_style,
        config.selection.fallback_seed
    );
    tracing::info!("Synonyms: {} entries", config.selection.synonyms.len());
    tracing::info!("Recommend Top N: {}", config.selection.recommend_top_n);
    match config.selection.rng_seed {
        Some(seed) => tracing::info!("RNG Seed: {}", seed),
        None => tracing::info!("RNG Seed: entropy"),
    }
    tracing::info!("Log Level: {} (json={})", config.log.level, config.log.json);
    tracing::info!("=================================");
}
