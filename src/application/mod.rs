//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（角色音色缓存、随机源）
//! - catalog: 只读目录与选种策略
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod catalog;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use catalog::{SelectionPolicy, VoiceCatalog};

pub use commands::{
    handlers::{ResolveSeedHandler, ResolvedSeed, SeedSource},
    ResolveSeed,
};

pub use error::ApplicationError;

pub use ports::{
    CachedVoice, CharacterVoiceCachePort, CharacterVoiceKey, SeedPickerPort, VoiceKeyScope,
};

pub use queries::{
    handlers::{
        GetAgeStyleCombinationsHandler, GetCatalogMappingHandler, GetVoiceCandidatesHandler,
        GetVoicePreferencesHandler, ListCharacterVoicesHandler, RecommendSeedsHandler,
        SelectBestSeedHandler, SelectedSeed,
    },
    GetAgeStyleCombinations, GetCatalogMapping, GetVoiceCandidates, GetVoicePreferences,
    ListCharacterVoices, RecommendSeeds, SelectBestSeed,
};
