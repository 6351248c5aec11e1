//! Query Handlers

mod character_handlers;
mod preference_handlers;
mod seed_handlers;

pub use character_handlers::ListCharacterVoicesHandler;
pub use preference_handlers::{
    GetAgeStyleCombinationsHandler, GetVoiceCandidatesHandler, GetVoicePreferencesHandler,
};
pub use seed_handlers::{
    GetCatalogMappingHandler, RecommendSeedsHandler, SelectBestSeedHandler, SelectedSeed,
};
