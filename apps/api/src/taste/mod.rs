//! Taste-graph client — the single point of entry for all Qloo API calls.
//!
//! Two endpoints are used: `/v1/autocomplete` to resolve a free-text taste
//! entry into a Qloo entity id, and `/v2/trending` to pull trending entity
//! names related to it. Trending names become the taste signals fed into
//! the persona prompt.

use chrono::{Datelike, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TasteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Qloo entity kinds used by the app's three taste categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Artist,
    Movie,
    Brand,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Movie => "movie",
            EntityKind::Brand => "brand",
        }
    }

    /// Qloo URN used in trending filters, e.g. `urn:entity:artist`.
    pub fn urn(&self) -> String {
        format!("urn:entity:{}", self.as_str())
    }
}

/// A single autocomplete match returned to the Input Collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub entity_id: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    results: Vec<AutocompleteEntity>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteEntity {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    entity_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    results: Vec<TrendingEntity>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntity {
    #[serde(default)]
    name: Option<String>,
}

/// Client for the Qloo taste-graph API.
#[derive(Clone)]
pub struct TasteClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TasteClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns autocomplete suggestions for a query, filtered to entities
    /// whose Qloo type contains the requested kind (e.g. `urn:entity:artist`
    /// matches kind `artist`).
    pub async fn autocomplete(
        &self,
        query: &str,
        kind: EntityKind,
    ) -> Result<Vec<Suggestion>, TasteError> {
        let url = format!("{}/v1/autocomplete", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TasteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: AutocompleteResponse = response.json().await?;
        let suggestions = parsed
            .results
            .into_iter()
            .filter(|r| kind_matches(r.entity_type.as_deref(), kind))
            .filter_map(|r| {
                Some(Suggestion {
                    name: r.name?,
                    entity_id: r.id?,
                })
            })
            .collect::<Vec<_>>();

        debug!(
            "Autocomplete [{}] ({}) -> {} suggestions",
            query,
            kind.as_str(),
            suggestions.len()
        );
        Ok(suggestions)
    }

    /// Resolves a free-text taste entry to its best-matching entity id.
    /// A successful lookup with no usable match is `Ok(None)`, not an error.
    pub async fn resolve_entity(
        &self,
        query: &str,
        kind: EntityKind,
    ) -> Result<Option<String>, TasteError> {
        let suggestions = self.autocomplete(query, kind).await?;
        Ok(suggestions.into_iter().next().map(|s| s.entity_id))
    }

    /// Returns names of entities trending alongside `entity_id`, over a
    /// window from January 1st of the current year to today.
    pub async fn trending(
        &self,
        entity_id: &str,
        kind: EntityKind,
    ) -> Result<Vec<String>, TasteError> {
        let today = Utc::now().date_naive();
        let start_date = format!("{}-01-01", today.year());
        let end_date = today.to_string();

        let url = format!("{}/v2/trending", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("filter.start_date", start_date.as_str()),
                ("filter.end_date", end_date.as_str()),
                ("filter.type", &kind.urn()),
                ("signal.interests.entities", entity_id),
            ])
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TasteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: TrendingResponse = response.json().await?;
        let names = parsed
            .results
            .into_iter()
            .filter_map(|r| r.name)
            .collect::<Vec<_>>();

        debug!("Trending for {} -> {} names", entity_id, names.len());
        Ok(names)
    }

    /// Full signal lookup for one taste category: resolve the entity, then
    /// fetch its trending names. An unresolvable entry contributes no
    /// signals; a failed call is propagated.
    pub async fn signals_for(
        &self,
        query: &str,
        kind: EntityKind,
    ) -> Result<Vec<String>, TasteError> {
        match self.resolve_entity(query, kind).await? {
            Some(entity_id) => self.trending(&entity_id, kind).await,
            None => {
                debug!("No {} entity resolved for [{}]", kind.as_str(), query);
                Ok(Vec::new())
            }
        }
    }
}

fn kind_matches(entity_type: Option<&str>, kind: EntityKind) -> bool {
    entity_type
        .map(|t| t.to_lowercase().contains(kind.as_str()))
        .unwrap_or(false)
}
