//! Persona generation — orchestrates the full analyze pipeline.
//!
//! Flow: validate preference set → resolve taste signals (three categories
//! concurrently) → fan out persona + cultural-map LLM calls → join → merge
//! into one `CulturalMatchResult`.
//!
//! All-or-nothing: if any external call fails, the whole request fails and
//! no partial result is returned.

use std::collections::BTreeMap;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{temperature_for_variation, LlmClient};
use crate::persona::language::prompt_language;
use crate::persona::models::{CountryInsight, CulturalMatchResult, PersonaProfile, PreferenceSet};
use crate::persona::prompts::{
    CULTURAL_MAP_PROMPT_TEMPLATE, CULTURAL_MAP_SYSTEM, PERSONA_PROMPT_TEMPLATE, PERSONA_SYSTEM,
};
use crate::taste::{EntityKind, TasteClient, TasteError};

/// Regions rendered on the cultural map card.
const SAMPLE_COUNTRIES: [&str; 4] = ["USA", "South Korea", "UK", "Japan"];

/// Temperature for cultural-map insights. Fixed — the map does not vary
/// with the "try again" seed, only the persona does.
const CULTURAL_MAP_TEMPERATURE: f32 = 0.7;

/// Runs the full analyze pipeline for one preference set.
pub async fn analyze(
    llm: &LlmClient,
    taste: &TasteClient,
    prefs: PreferenceSet,
) -> Result<CulturalMatchResult, AppError> {
    if !prefs.has_taste_entries() {
        return Err(AppError::Validation(
            "At least one of music, movies, or brands must be provided".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    info!(
        "Analyze {}: language={}, variation={}",
        request_id, prefs.language, prefs.variation
    );

    // Step 1: taste-graph signals, one lookup per non-blank category
    let taste_signals = gather_taste_signals(taste, &prefs).await?;
    info!(
        "Analyze {}: {} taste signals resolved",
        request_id,
        taste_signals.len()
    );

    // Step 2: fan out the two LLM calls and join; both must succeed
    let persona_prompt = build_persona_prompt(&prefs, &taste_signals);
    let map_prompt = build_cultural_map_prompt(&prefs.language, &SAMPLE_COUNTRIES);
    let temperature = temperature_for_variation(prefs.variation);

    let persona_call = async {
        llm.call_json::<PersonaProfile>(&persona_prompt, PERSONA_SYSTEM, temperature)
            .await
            .map_err(|e| AppError::Llm(format!("Persona generation failed: {e}")))
    };
    let map_call = async {
        llm.call_json::<Vec<CountryInsight>>(
            &map_prompt,
            CULTURAL_MAP_SYSTEM,
            CULTURAL_MAP_TEMPERATURE,
        )
        .await
        .map_err(|e| AppError::Llm(format!("Cultural map generation failed: {e}")))
    };

    let (profile, insights) = tokio::try_join!(persona_call, map_call)?;

    if !profile.is_substantive() {
        return Err(AppError::Llm(
            "LLM returned a structurally empty persona".to_string(),
        ));
    }

    info!(
        "Analyze {}: persona \"{}\", twin \"{}\", {} country insights",
        request_id,
        profile.persona_name,
        profile.cultural_twin,
        insights.len()
    );

    Ok(CulturalMatchResult {
        request_id,
        cultural_twin: profile.cultural_twin.clone(),
        result: profile,
        country_insights: key_insights_by_country(insights),
    })
}

/// Resolves taste signals for the three categories concurrently.
/// Blank categories are skipped; a failed Qloo call fails the whole lookup.
async fn gather_taste_signals(
    taste: &TasteClient,
    prefs: &PreferenceSet,
) -> Result<Vec<String>, AppError> {
    let (music, movies, brands) = tokio::try_join!(
        signals_if_present(taste, &prefs.music, EntityKind::Artist),
        signals_if_present(taste, &prefs.movies, EntityKind::Movie),
        signals_if_present(taste, &prefs.brands, EntityKind::Brand),
    )
    .map_err(|e| AppError::TasteGraph(format!("Taste signal lookup failed: {e}")))?;

    let mut signals = music;
    signals.extend(movies);
    signals.extend(brands);
    Ok(signals)
}

async fn signals_if_present(
    taste: &TasteClient,
    query: &str,
    kind: EntityKind,
) -> Result<Vec<String>, TasteError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    taste.signals_for(query, kind).await
}

/// Fills the persona prompt template from a preference set and its signals.
fn build_persona_prompt(prefs: &PreferenceSet, taste_signals: &[String]) -> String {
    let signals = if taste_signals.is_empty() {
        "None available".to_string()
    } else {
        taste_signals.join(", ")
    };

    PERSONA_PROMPT_TEMPLATE
        .replace("{language}", prompt_language(&prefs.language))
        .replace("{movies}", prefs.movies.trim())
        .replace("{music}", prefs.music.trim())
        .replace("{brands}", prefs.brands.trim())
        .replace("{gender}", prefs.gender.trim())
        .replace("{taste_signals}", &signals)
        .replace("{variation_seed}", &prefs.variation.to_string())
}

/// Fills the cultural-map prompt template for the sample regions.
fn build_cultural_map_prompt(language: &str, countries: &[&str]) -> String {
    CULTURAL_MAP_PROMPT_TEMPLATE
        .replace("{language}", prompt_language(language))
        .replace("{countries}", &countries.join(", "))
}

/// Keys the LLM's insight array by country name, as the card expects.
fn key_insights_by_country(insights: Vec<CountryInsight>) -> BTreeMap<String, CountryInsight> {
    insights
        .into_iter()
        .map(|i| (i.country.clone(), i))
        .collect()
}
