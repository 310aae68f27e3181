use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::taste::TasteClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub taste: TasteClient,
    #[allow(dead_code)]
    pub config: Config,
}
