//! File Catalog Loader
//!
//! 启动时读取一次目录文件；文件缺失、不可读或无有效条目时退回内置目录并告警

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::application::VoiceCatalog;
use crate::domain::seed::{fallback_catalog, parse_catalog_json, parse_catalog_text, SeedRecord};
use crate::domain::style::VoicePreferences;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("No usable entries in {0}")]
    Empty(PathBuf),
}

/// 扩展名为 .json 时按 JSON 解析
fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

async fn read(path: &Path) -> Result<String, CatalogLoadError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub struct FileCatalogLoader {
    seed_file: PathBuf,
    preferences_file: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(seed_file: impl Into<PathBuf>, preferences_file: impl Into<PathBuf>) -> Self {
        Self {
            seed_file: seed_file.into(),
            preferences_file: preferences_file.into(),
        }
    }

    pub async fn load(&self) -> VoiceCatalog {
        let records = self.load_seeds().await;
        let preferences = self.load_preferences().await;
        VoiceCatalog::new(records, preferences)
    }

    /// 种子目录，失败时返回内置目录
    pub async fn load_seeds(&self) -> Vec<SeedRecord> {
        match self.try_load_seeds().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("{}, using built-in seed catalog", e);
                fallback_catalog()
            }
        }
    }

    /// 风格目录，失败时返回内置目录
    pub async fn load_preferences(&self) -> VoicePreferences {
        match self.try_load_preferences().await {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!("{}, using built-in voice preferences", e);
                VoicePreferences::fallback()
            }
        }
    }

    pub async fn try_load_seeds(&self) -> Result<Vec<SeedRecord>, CatalogLoadError> {
        let path = &self.seed_file;
        let content = read(path).await?;

        let parsed = if is_json(path) {
            parse_catalog_json(&content).map_err(|e| CatalogLoadError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            parse_catalog_text(&content)
        };

        if parsed.records.is_empty() {
            return Err(CatalogLoadError::Empty(path.clone()));
        }

        tracing::info!(
            path = %path.display(),
            seeds = parsed.records.len(),
            rejected = parsed.rejected,
            "Seed catalog loaded"
        );
        Ok(parsed.records)
    }

    pub async fn try_load_preferences(&self) -> Result<VoicePreferences, CatalogLoadError> {
        let path = &self.preferences_file;
        let content = read(path).await?;

        let preferences =
            VoicePreferences::from_json_str(&content).map_err(|e| CatalogLoadError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if preferences.styles().is_empty() && preferences.seed_index().is_empty() {
            return Err(CatalogLoadError::Empty(path.clone()));
        }

        tracing::info!(
            path = %path.display(),
            styles = preferences.styles().len(),
            seeds = preferences.distinct_seed_count(),
            "Voice preferences loaded"
        );
        Ok(preferences)
    }
}
