use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::{ArtifactGenerator, GenRequest};
use reelcraft_types::{ReelcraftError, Result};

const DEFAULT_TIMEOUT_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// OpenAiGenerator
// ---------------------------------------------------------------------------

/// OpenAI chat-completions adapter using structured output.
///
/// Every stage request is sent with `response_format: json_schema` in strict
/// mode and temperature 0, so the reply body is a single JSON document the
/// caller validates against the artifact type.
#[derive(Debug)]
pub struct OpenAiGenerator {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout_ms: u64,
}

impl OpenAiGenerator {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn from_env() -> Result<Self> {
        let key = std::env::var("OPENAI_API_KEY").map_err(|_| ReelcraftError::AuthError {
            provider: "openai".into(),
        })?;
        Ok(Self::new(key))
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    fn build_request_body(&self, request: &GenRequest) -> serde_json::Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt},
            ],
            "temperature": request.temperature.unwrap_or(0.0),
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.stage.as_str(),
                    "schema": request.schema,
                    "strict": true,
                }
            }
        });
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    fn parse_response(
        &self,
        stage: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value> {
        // A refusal means the model declined to produce the artifact at all.
        if let Some(refusal) = body["choices"][0]["message"]["refusal"].as_str() {
            return Err(ReelcraftError::SchemaError {
                stage: stage.to_string(),
                message: format!("model refused: {refusal}"),
            });
        }

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ReelcraftError::SchemaError {
                stage: stage.to_string(),
                message: "response carried no message content".into(),
            })?;

        serde_json::from_str(content).map_err(|e| ReelcraftError::SchemaError {
            stage: stage.to_string(),
            message: format!("content is not valid JSON: {e}"),
        })
    }

    fn map_status_error(&self, status: reqwest::StatusCode, message: String) -> ReelcraftError {
        match status.as_u16() {
            401 | 403 => ReelcraftError::AuthError {
                provider: "openai".into(),
            },
            429 => ReelcraftError::RateLimited {
                provider: "openai".into(),
                retry_after_ms: 1_000,
            },
            s if s >= 500 => ReelcraftError::ProviderError {
                provider: "openai".into(),
                status: s,
                message,
                retryable: true,
            },
            s => ReelcraftError::ProviderError {
                provider: "openai".into(),
                status: s,
                message,
                retryable: false,
            },
        }
    }
}

#[async_trait]
impl ArtifactGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenRequest) -> Result<serde_json::Value> {
        let stage = request.stage.as_str();
        let body = self.build_request_body(request);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(stage, model = %self.model, "generative request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_millis(self.timeout_ms))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReelcraftError::RequestTimeout {
                        stage: stage.to_string(),
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    ReelcraftError::ProviderError {
                        provider: "openai".into(),
                        status: 0,
                        message: e.to_string(),
                        retryable: true,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(self.map_status_error(status, message));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ReelcraftError::ProviderError {
                provider: "openai".into(),
                status: status.as_u16(),
                message: format!("response body is not JSON: {e}"),
                retryable: true,
            }
        })?;

        self.parse_response(stage, body)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StageKind;

    fn generator() -> OpenAiGenerator {
        OpenAiGenerator::new("test-key".into())
    }

    fn request() -> GenRequest {
        GenRequest::new(
            StageKind::Scenes,
            "You are a scene analyst.",
            "Summarize the segments.",
            crate::scenes_schema(),
        )
    }

    // Test 1: request body carries model, messages, and strict schema
    #[test]
    fn build_request_body_shape() {
        let body = generator().build_request_body(&request());
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "scenes");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert!(body.get("max_tokens").is_none());
    }

    // Test 2: explicit temperature and max_tokens pass through
    #[test]
    fn build_request_body_overrides() {
        let mut req = request();
        req.temperature = Some(0.4);
        req.max_tokens = Some(2048);
        let body = generator().build_request_body(&req);
        assert_eq!(body["temperature"], 0.4);
        assert_eq!(body["max_tokens"], 2048);
    }

    // Test 3: response content is unwrapped and parsed as JSON
    #[test]
    fn parse_response_extracts_content_json() {
        let body = serde_json::json!({
            "choices": [{
                "message": {"content": "{\"scenes\": []}"}
            }]
        });
        let out = generator().parse_response("scenes", body).unwrap();
        assert_eq!(out, serde_json::json!({"scenes": []}));
    }

    // Test 4: non-JSON content becomes a retryable schema error
    #[test]
    fn parse_response_non_json_is_schema_error() {
        let body = serde_json::json!({
            "choices": [{"message": {"content": "sorry, no"}}]
        });
        let err = generator().parse_response("scenes", body).unwrap_err();
        assert!(matches!(err, ReelcraftError::SchemaError { .. }));
        assert!(err.is_retryable());
    }

    // Test 5: refusal is surfaced as a schema error
    #[test]
    fn parse_response_refusal_is_schema_error() {
        let body = serde_json::json!({
            "choices": [{"message": {"refusal": "cannot comply"}}]
        });
        let err = generator().parse_response("scenes", body).unwrap_err();
        match err {
            ReelcraftError::SchemaError { message, .. } => {
                assert!(message.contains("cannot comply"));
            }
            other => panic!("Expected SchemaError, got: {other:?}"),
        }
    }

    // Test 6: missing content is a schema error
    #[test]
    fn parse_response_missing_content_is_schema_error() {
        let body = serde_json::json!({"choices": []});
        let err = generator().parse_response("scenes", body).unwrap_err();
        assert!(matches!(err, ReelcraftError::SchemaError { .. }));
    }

    // Test 7: HTTP status mapping
    #[test]
    fn status_error_mapping() {
        let g = generator();
        assert!(matches!(
            g.map_status_error(reqwest::StatusCode::UNAUTHORIZED, String::new()),
            ReelcraftError::AuthError { .. }
        ));
        assert!(matches!(
            g.map_status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, String::new()),
            ReelcraftError::RateLimited { .. }
        ));
        let err = g.map_status_error(reqwest::StatusCode::BAD_GATEWAY, "down".into());
        match err {
            ReelcraftError::ProviderError {
                status, retryable, ..
            } => {
                assert_eq!(status, 502);
                assert!(retryable);
            }
            other => panic!("Expected ProviderError, got: {other:?}"),
        }
        let err = g.map_status_error(reqwest::StatusCode::BAD_REQUEST, "bad".into());
        match err {
            ReelcraftError::ProviderError { retryable, .. } => assert!(!retryable),
            other => panic!("Expected ProviderError, got: {other:?}"),
        }
    }

    // Test 8: builder methods
    #[test]
    fn builder_methods() {
        let g = generator()
            .with_base_url("http://localhost:8080".into())
            .with_model("gpt-4o-mini".into())
            .with_timeout(Duration::from_secs(10));
        assert_eq!(g.base_url, "http://localhost:8080");
        assert_eq!(g.default_model(), "gpt-4o-mini");
        assert_eq!(g.timeout_ms, 10_000);
        assert_eq!(g.name(), "openai");
    }
}
