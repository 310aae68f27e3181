//! Axum route handlers for the persona API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::persona::generator::analyze;
use crate::persona::models::{CulturalMatchResult, PreferenceSet};
use crate::state::AppState;
use crate::taste::{EntityKind, Suggestion};

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_entity_kind")]
    pub entity_type: EntityKind,
}

fn default_entity_kind() -> EntityKind {
    EntityKind::Artist
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<Suggestion>,
}

/// POST /api/v1/analyze
///
/// Full analyze pipeline: taste signal lookup → persona + cultural-map
/// generation → merged `CulturalMatchResult`. An empty preference set is
/// rejected here, before any outbound call is made.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(prefs): Json<PreferenceSet>,
) -> Result<Json<CulturalMatchResult>, AppError> {
    if !prefs.has_taste_entries() {
        return Err(AppError::Validation(
            "At least one of music, movies, or brands must be provided".to_string(),
        ));
    }

    let result = analyze(&state.llm, &state.taste, prefs).await?;
    Ok(Json(result))
}

/// GET /api/v1/autocomplete?query=...&entity_type=artist|movie|brand
///
/// Suggestion proxy for the input form. Returns taste-graph matches for a
/// partial entry so the user can pick a recognized entity.
pub async fn handle_autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    if params.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let suggestions = state
        .taste
        .autocomplete(params.query.trim(), params.entity_type)
        .await
        .map_err(|e| AppError::TasteGraph(format!("Autocomplete failed: {e}")))?;

    Ok(Json(AutocompleteResponse { suggestions }))
}
