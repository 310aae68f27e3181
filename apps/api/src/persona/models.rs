//! Data models for the persona pipeline.
//!
//! `PreferenceSet` is what the frontend submits; `PersonaProfile` and
//! `CountryInsight` mirror the JSON schemas the LLM is instructed to
//! produce; `CulturalMatchResult` is the merged payload returned to the UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's stated tastes, submitted from the form.
///
/// At least one of the three category fields must be non-blank; this is
/// checked before any outbound call is made. Nothing here is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceSet {
    #[serde(default)]
    pub music: String,
    #[serde(default)]
    pub movies: String,
    #[serde(default)]
    pub brands: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// "Try again with same taste" bumps this; it raises sampling
    /// temperature so the same preferences yield a fresh result.
    #[serde(default)]
    pub variation: u32,
}

fn default_language() -> String {
    "en".to_string()
}

impl PreferenceSet {
    /// True when at least one taste category carries a non-blank entry.
    pub fn has_taste_entries(&self) -> bool {
        !self.music.trim().is_empty()
            || !self.movies.trim().is_empty()
            || !self.brands.trim().is_empty()
    }
}

/// The persona the LLM generates from a preference set.
/// Field names match the JSON schema in the persona prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    pub persona_name: String,
    pub description: String,
    pub traits: Vec<String>,
    pub insights: PersonaInsights,
    /// Famous-person match — name only, no description.
    pub cultural_twin: String,
    pub therapy_suggestion: TherapySuggestion,
    /// Region name -> % score, at most four regions.
    #[serde(rename = "culturalDNAScore")]
    pub cultural_dna_score: BTreeMap<String, f32>,
    pub archetype: Archetype,
}

impl PersonaProfile {
    /// A structurally empty profile is an LLM failure, not a success:
    /// the card cannot render without a name, a description, and scores.
    pub fn is_substantive(&self) -> bool {
        !self.persona_name.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.cultural_dna_score.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaInsights {
    pub likely_interests: String,
    pub likely_behaviors: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapySuggestion {
    pub summary: String,
    pub recommendation: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub daily_tip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub description: String,
}

/// One cultural-map entry for a sample region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInsight {
    pub country: String,
    pub cultural_insight: String,
    pub recommendation: String,
}

/// The merged result of one analyze request — one persona plus the
/// cultural map, derived from exactly one preference set. Immutable once
/// constructed; never built from partial responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalMatchResult {
    /// Correlation id for logs; not stored anywhere.
    pub request_id: Uuid,
    pub result: PersonaProfile,
    pub cultural_twin: String,
    pub country_insights: BTreeMap<String, CountryInsight>,
}
