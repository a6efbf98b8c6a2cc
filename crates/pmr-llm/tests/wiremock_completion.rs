use pmr_config::LlmConfig;
use pmr_core::entities::{CombinedSettings, Setup, SimpleTier};
use pmr_core::enums::Species;
use pmr_core::ports::StructuredCompleter;
use pmr_core::protocol::{
    CompletionRequest, QueryRefinementRequest, QuerySuggestion, SettingsRefinementRequest,
    TypedResponse,
};
use pmr_llm::{ChatCompletionsClient, LlmError};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ChatCompletionsClient {
    let config = LlmConfig {
        api_key: "sk-test".into(),
        base_url: format!("{}/v1", server.uri()),
        ..LlmConfig::default()
    };
    ChatCompletionsClient::new(&config).unwrap()
}

fn envelope(content: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content.to_string()},
            "finish_reason": "stop"
        }]
    })
}

fn settings_request(advanced: bool) -> CompletionRequest {
    let combined = CombinedSettings {
        simple: SimpleTier {
            keywords: Some("triclosan".into()),
            ..SimpleTier::default()
        },
        ..CombinedSettings::default()
    };
    CompletionRequest::Settings(SettingsRefinementRequest {
        setup: Setup {
            researcher_goal: "liver toxicity".into(),
            ..Setup::default()
        },
        current_settings: combined.project(advanced),
        queries_to_generate: 10,
        instruction: "limit to humans".into(),
    })
}

#[tokio::test]
async fn settings_refinement_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "response_format": {
                "type": "json_schema",
                "json_schema": {"name": "advanced_settings_response"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&serde_json::json!({
            "updated_settings": {"species": "Humans", "start_year": 2021, "end_year": 2026},
            "queries": [{"query_text": "triclosan AND liver AND humans[mh]"}]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).complete(&settings_request(true)).await.unwrap();

    let TypedResponse::SettingsUpdate { settings, queries } = response else {
        panic!("expected settings update");
    };
    assert_eq!(settings.advanced().and_then(|a| a.species), Some(Species::Humans));
    assert_eq!(settings.simple().start_year, Some(2021));
    assert_eq!(queries, vec![QuerySuggestion::new("triclosan AND liver AND humans[mh]")]);
}

#[tokio::test]
async fn query_refinement_returns_query_list() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&serde_json::json!({
            "queries": [{"query_text": "A"}, {"query_text": "B"}]
        }))))
        .mount(&server)
        .await;

    let request = CompletionRequest::Queries(QueryRefinementRequest {
        setup: Setup::default(),
        settings: CombinedSettings::default().project(false),
        recent_queries: vec!["triclosan".into()],
        queries_to_generate: 5,
        instruction: "more variations".into(),
    });
    let response = client_for(&server).complete(&request).await.unwrap();
    assert_eq!(
        response,
        TypedResponse::QueryList(vec![QuerySuggestion::new("A"), QuerySuggestion::new("B")])
    );
}

#[tokio::test]
async fn schema_mismatch_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&serde_json::json!({
            "updated_settings": {"text_availability": "everything"}
        }))))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&settings_request(false)).await.unwrap_err();
    assert!(matches!(err, LlmError::Schema(_)));
}

#[tokio::test]
async fn non_json_content_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Sure! Here you go"}}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&settings_request(false)).await.unwrap_err();
    assert!(matches!(err, LlmError::Parse(_)));
}

#[tokio::test]
async fn unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&settings_request(false)).await.unwrap_err();
    assert!(matches!(err, LlmError::Auth));
}

#[tokio::test]
async fn rate_limit_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "Rate limit reached. Please try again in 7s."}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&settings_request(false)).await.unwrap_err();
    assert!(matches!(err, LlmError::RateLimited { retry_after_secs: 7 }));
}
