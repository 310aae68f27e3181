pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::persona::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/autocomplete", get(handlers::handle_autocomplete))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::taste::TasteClient;

    const PERSONA_CONTENT: &str = r#"{
        "personaName": "The Midnight Curator",
        "description": "Collects moods the way others collect records.",
        "traits": ["curious", "nocturnal", "eclectic"],
        "insights": {
            "likelyInterests": "Vinyl hunting, arthouse cinema",
            "likelyBehaviors": "Builds playlists for imaginary films"
        },
        "culturalTwin": "Thom Yorke",
        "therapySuggestion": {
            "summary": "You process feelings through curation.",
            "recommendation": "Try journaling alongside your playlists.",
            "resources": ["https://example.org/journaling"],
            "dailyTip": "One song, one page."
        },
        "culturalDNAScore": {"UK": 40, "Japan": 25, "USA": 20, "South Korea": 15},
        "archetype": {"name": "The Curator", "description": "Finds identity in what they collect."}
    }"#;

    const MAP_CONTENT: &str = r#"[
        {"country": "Japan", "culturalInsight": "Precision and play coexist.", "recommendation": "Studio Ghibli"},
        {"country": "UK", "culturalInsight": "Dry wit, loud guitars.", "recommendation": "Radiohead"}
    ]"#;

    fn test_app(llm_url: String, qloo_url: String) -> Router {
        let config = Config {
            openai_api_key: "test-openai-key".to_string(),
            openai_api_url: llm_url.clone(),
            qloo_api_key: "test-qloo-key".to_string(),
            qloo_api_url: qloo_url.clone(),
            port: 0,
            rust_log: "info".to_string(),
        };
        let state = AppState {
            llm: LlmClient::new(config.openai_api_key.clone(), llm_url),
            taste: TasteClient::new(config.qloo_api_key.clone(), qloo_url),
            config,
        };
        build_router(state)
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"content": content}}],
            "usage": {"prompt_tokens": 50, "completion_tokens": 40}
        })
    }

    async fn mount_qloo_music_mocks(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/autocomplete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "ar-1", "name": "Radiohead", "type": "urn:entity:artist"}]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/trending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"name": "Portishead"}]
            })))
            .mount(server)
            .await;
    }

    async fn mount_openai_mocks(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Variation seed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(PERSONA_CONTENT)))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Countries:"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(MAP_CONTENT)))
            .mount(server)
            .await;
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app("http://llm.invalid".to_string(), "http://qloo.invalid".to_string());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_empty_preference_set_rejected_before_any_outbound_call() {
        let external = MockServer::start().await;
        let app = test_app(external.uri(), external.uri());

        let response = app
            .oneshot(analyze_request(
                r#"{"music": "", "movies": " ", "brands": "", "gender": "female"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(external.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_analyze_merges_persona_and_scores() {
        let qloo = MockServer::start().await;
        let openai = MockServer::start().await;
        mount_qloo_music_mocks(&qloo).await;
        mount_openai_mocks(&openai).await;

        let app = test_app(openai.uri(), qloo.uri());
        let response = app
            .oneshot(analyze_request(
                r#"{"music": "Radiohead", "movies": "", "brands": "", "gender": "female"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"]["personaName"], "The Midnight Curator");
        assert_eq!(json["culturalTwin"], "Thom Yorke");
        assert_eq!(json["result"]["culturalDNAScore"]["UK"], 40.0);
        assert_eq!(
            json["countryInsights"]["Japan"]["recommendation"],
            "Studio Ghibli"
        );
        assert!(json["requestId"].is_string());

        // Taste signals flowed into the persona prompt
        let llm_requests = openai.received_requests().await.unwrap();
        assert!(llm_requests
            .iter()
            .any(|r| String::from_utf8_lossy(&r.body).contains("Portishead")));
    }

    #[tokio::test]
    async fn test_llm_failure_yields_no_partial_result() {
        let qloo = MockServer::start().await;
        let openai = MockServer::start().await;
        mount_qloo_music_mocks(&qloo).await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Invalid API key"}
            })))
            .mount(&openai)
            .await;

        let app = test_app(openai.uri(), qloo.uri());
        let response = app
            .oneshot(analyze_request(
                r#"{"music": "Radiohead", "movies": "", "brands": "", "gender": "female"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXTERNAL_CALL_FAILED");
        // Generic message only; no persona fields leak out
        assert!(json.get("result").is_none());
        assert!(json.get("culturalTwin").is_none());
    }

    #[tokio::test]
    async fn test_structurally_empty_persona_is_an_error_not_a_success() {
        let qloo = MockServer::start().await;
        let openai = MockServer::start().await;
        mount_qloo_music_mocks(&qloo).await;

        // Valid JSON, but a card cannot render from it: blank name, no scores
        let empty_persona = PERSONA_CONTENT
            .replace("The Midnight Curator", "")
            .replace(
                r#"{"UK": 40, "Japan": 25, "USA": 20, "South Korea": 15}"#,
                "{}",
            );
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Variation seed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body(&empty_persona)),
            )
            .mount(&openai)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("Countries:"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(MAP_CONTENT)))
            .mount(&openai)
            .await;

        let app = test_app(openai.uri(), qloo.uri());
        let response = app
            .oneshot(analyze_request(
                r#"{"music": "Radiohead", "movies": "", "brands": "", "gender": "female"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXTERNAL_CALL_FAILED");
        assert!(json.get("result").is_none());
        assert!(json.get("culturalTwin").is_none());
    }

    #[tokio::test]
    async fn test_taste_graph_failure_fails_whole_request() {
        let qloo = MockServer::start().await;
        let openai = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/autocomplete"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&qloo)
            .await;
        mount_openai_mocks(&openai).await;

        let app = test_app(openai.uri(), qloo.uri());
        let response = app
            .oneshot(analyze_request(
                r#"{"music": "Radiohead", "movies": "", "brands": "", "gender": "female"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXTERNAL_CALL_FAILED");
    }

    #[tokio::test]
    async fn test_try_again_reuses_preferences_with_new_variation() {
        let qloo = MockServer::start().await;
        let openai = MockServer::start().await;
        mount_qloo_music_mocks(&qloo).await;
        mount_openai_mocks(&openai).await;

        // Same taste, bumped variation seed, no server-side state involved
        let app = test_app(openai.uri(), qloo.uri());
        let response = app
            .oneshot(analyze_request(
                r#"{"music": "Radiohead", "movies": "", "brands": "", "gender": "female", "variation": 5}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let llm_requests = openai.received_requests().await.unwrap();
        assert!(llm_requests
            .iter()
            .any(|r| String::from_utf8_lossy(&r.body).contains("Variation seed: 5")));
    }

    #[tokio::test]
    async fn test_autocomplete_endpoint_proxies_suggestions() {
        let qloo = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/autocomplete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "mv-1", "name": "Arrival", "type": "urn:entity:movie"}]
            })))
            .mount(&qloo)
            .await;

        let app = test_app("http://llm.invalid".to_string(), qloo.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/autocomplete?query=arriv&entity_type=movie")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["suggestions"][0]["name"], "Arrival");
        assert_eq!(json["suggestions"][0]["entity_id"], "mv-1");
    }

    #[tokio::test]
    async fn test_autocomplete_rejects_blank_query() {
        let qloo = MockServer::start().await;
        let app = test_app("http://llm.invalid".to_string(), qloo.uri());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/autocomplete?query=%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(qloo.received_requests().await.unwrap().is_empty());
    }
}
