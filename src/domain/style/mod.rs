//! Style Context - 风格目录限界上下文
//!
//! 职责:
//! - 风格目录（声音偏好 JSON）与种子对照表
//! - 前端标签归一化
//! - 精确匹配三级回退
//! - 前端组合视图

mod combination;
mod definition;
mod errors;
mod normalize;
mod resolver;

pub use combination::{
    age_style_combinations, build_frontend_view, voice_candidates, AgeStyleCombination,
    CandidateSeed, CombinationView, FrontendView, StyleCombo, StyleView, StyleViews, ViewStats,
};
pub use definition::{
    SeedIndexEntry, StyleDefinition, StyleLeaf, VoicePreferences, AGE_OPTIONS_KEY,
    GENDER_OPTIONS_KEY, SEED_INDEX_KEY, STYLES_KEY,
};
pub use errors::StyleError;
pub use normalize::{
    default_age_aliases, default_gender_aliases, default_personality_styles, LabelNormalizer,
    STYLE_SUFFIX,
};
pub use resolver::{exact_matches, resolve_exact, FallbackSeeds, Resolution, ResolutionTier};
