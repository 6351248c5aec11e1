//! Voice Preference Query Handlers

use std::sync::Arc;

use crate::application::catalog::{SelectionPolicy, VoiceCatalog};
use crate::application::error::ApplicationError;
use crate::application::queries::{GetAgeStyleCombinations, GetVoiceCandidates, GetVoicePreferences};
use crate::domain::style::{
    age_style_combinations, build_frontend_view, voice_candidates, AgeStyleCombination,
    FrontendView, SeedIndexEntry,
};

/// GetVoicePreferences Handler
pub struct GetVoicePreferencesHandler {
    catalog: Arc<VoiceCatalog>,
}

impl GetVoicePreferencesHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, _query: GetVoicePreferences) -> Result<FrontendView, ApplicationError> {
        Ok(build_frontend_view(self.catalog.preferences()))
    }
}

/// GetVoiceCandidates Handler
pub struct GetVoiceCandidatesHandler {
    catalog: Arc<VoiceCatalog>,
    policy: Arc<SelectionPolicy>,
}

impl GetVoiceCandidatesHandler {
    pub fn new(catalog: Arc<VoiceCatalog>, policy: Arc<SelectionPolicy>) -> Self {
        Self { catalog, policy }
    }

    pub fn handle(&self, query: GetVoiceCandidates) -> Result<Vec<SeedIndexEntry>, ApplicationError> {
        let normalizer = &self.policy.normalizer;
        let gender = normalizer
            .gender(Some(query.gender.as_str()))
            .ok_or_else(|| ApplicationError::validation("gender is required"))?;
        let age = normalizer.age_label(query.age.as_deref());
        let style = normalizer.style_label(query.style.as_deref());

        let candidates = voice_candidates(
            self.catalog.preferences().seed_index(),
            &gender,
            age.as_deref(),
            style.as_deref(),
        );

        tracing::debug!(
            gender = %gender,
            count = candidates.len(),
            "Voice candidates listed"
        );

        Ok(candidates.into_iter().cloned().collect())
    }
}

/// GetAgeStyleCombinations Handler
pub struct GetAgeStyleCombinationsHandler {
    catalog: Arc<VoiceCatalog>,
    policy: Arc<SelectionPolicy>,
}

impl GetAgeStyleCombinationsHandler {
    pub fn new(catalog: Arc<VoiceCatalog>, policy: Arc<SelectionPolicy>) -> Self {
        Self { catalog, policy }
    }

    pub fn handle(
        &self,
        query: GetAgeStyleCombinations,
    ) -> Result<Vec<AgeStyleCombination>, ApplicationError> {
        let gender = self
            .policy
            .normalizer
            .gender(Some(query.gender.as_str()))
            .ok_or_else(|| ApplicationError::validation("gender is required"))?;

        Ok(age_style_combinations(
            self.catalog.preferences().seed_index(),
            &gender,
        ))
    }
}
