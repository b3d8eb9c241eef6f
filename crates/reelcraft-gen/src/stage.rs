use async_trait::async_trait;
use serde::de::DeserializeOwned;

use reelcraft_types::{ReelcraftError, Result};

// ---------------------------------------------------------------------------
// StageKind
// ---------------------------------------------------------------------------

/// The generative stages of a run. Each names one artifact the external
/// capability can produce; `Repair` covers both the tail-extension and the
/// punch-up rewrite, which return full replacement timelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Scenes,
    StoryIdea,
    Storyline,
    Timeline,
    FunEvaluation,
    Repair,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Scenes => "scenes",
            StageKind::StoryIdea => "story_idea",
            StageKind::Storyline => "storyline",
            StageKind::Timeline => "timeline",
            StageKind::FunEvaluation => "fun_evaluation",
            StageKind::Repair => "repair",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GenRequest
// ---------------------------------------------------------------------------

/// One request to the generative capability: stage identity, system and user
/// prompts, and the JSON schema the output must satisfy.
#[derive(Debug, Clone)]
pub struct GenRequest {
    pub stage: StageKind,
    pub system: String,
    pub prompt: String,
    pub schema: serde_json::Value,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenRequest {
    pub fn new(
        stage: StageKind,
        system: impl Into<String>,
        prompt: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        Self {
            stage,
            system: system.into(),
            prompt: prompt.into(),
            schema,
            temperature: None,
            max_tokens: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactGenerator
// ---------------------------------------------------------------------------

/// The external generative capability. Implementations return a JSON value
/// claimed to satisfy the request schema, or a structured failure; typed
/// validation happens in [`generate_typed`].
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    async fn generate(&self, request: &GenRequest) -> Result<serde_json::Value>;
    fn name(&self) -> &str;
    fn default_model(&self) -> &str;
}

// ---------------------------------------------------------------------------
// DynGenerator
// ---------------------------------------------------------------------------

/// Type-erased generator handle passed into the orchestrator and every
/// component that issues generative calls. No process-wide client state.
pub struct DynGenerator(Box<dyn ArtifactGenerator>);

impl DynGenerator {
    pub fn new(generator: impl ArtifactGenerator + 'static) -> Self {
        Self(Box::new(generator))
    }

    pub async fn generate(&self, request: &GenRequest) -> Result<serde_json::Value> {
        self.0.generate(request).await
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn default_model(&self) -> &str {
        self.0.default_model()
    }
}

// ---------------------------------------------------------------------------
// generate_typed
// ---------------------------------------------------------------------------

/// Issue one generative call and deserialize the result into the expected
/// artifact type. Output that fails deserialization becomes a retryable
/// [`ReelcraftError::SchemaError`] carrying the stage name.
pub async fn generate_typed<T: DeserializeOwned>(
    generator: &DynGenerator,
    request: &GenRequest,
) -> Result<T> {
    let value = generator.generate(request).await?;
    serde_json::from_value(value).map_err(|e| ReelcraftError::SchemaError {
        stage: request.stage.as_str().to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    struct MockGenerator {
        payload: serde_json::Value,
    }

    #[async_trait]
    impl ArtifactGenerator for MockGenerator {
        async fn generate(&self, _request: &GenRequest) -> Result<serde_json::Value> {
            Ok(self.payload.clone())
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn default_model(&self) -> &str {
            "mock-model"
        }
    }

    #[derive(Debug, Deserialize)]
    struct Toy {
        value: u32,
    }

    fn toy_request() -> GenRequest {
        GenRequest::new(
            StageKind::Scenes,
            "system",
            "prompt",
            json!({"type": "object"}),
        )
    }

    #[test]
    fn stage_kind_names() {
        assert_eq!(StageKind::Scenes.as_str(), "scenes");
        assert_eq!(StageKind::StoryIdea.as_str(), "story_idea");
        assert_eq!(StageKind::Storyline.as_str(), "storyline");
        assert_eq!(StageKind::Timeline.as_str(), "timeline");
        assert_eq!(StageKind::FunEvaluation.as_str(), "fun_evaluation");
        assert_eq!(StageKind::Repair.as_str(), "repair");
        assert_eq!(StageKind::Repair.to_string(), "repair");
    }

    #[tokio::test]
    async fn dyn_generator_delegates() {
        let generator = DynGenerator::new(MockGenerator {
            payload: json!({"value": 7}),
        });
        assert_eq!(generator.name(), "mock");
        assert_eq!(generator.default_model(), "mock-model");

        let out = generator.generate(&toy_request()).await.unwrap();
        assert_eq!(out, json!({"value": 7}));
    }

    #[tokio::test]
    async fn generate_typed_deserializes_valid_output() {
        let generator = DynGenerator::new(MockGenerator {
            payload: json!({"value": 42}),
        });
        let toy: Toy = generate_typed(&generator, &toy_request()).await.unwrap();
        assert_eq!(toy.value, 42);
    }

    #[tokio::test]
    async fn generate_typed_maps_invalid_output_to_schema_error() {
        let generator = DynGenerator::new(MockGenerator {
            payload: json!({"wrong_field": true}),
        });
        let err = generate_typed::<Toy>(&generator, &toy_request())
            .await
            .unwrap_err();
        match err {
            ReelcraftError::SchemaError { stage, .. } => assert_eq!(stage, "scenes"),
            other => panic!("Expected SchemaError, got: {other:?}"),
        }
        // schema failures are what the retry loop re-issues
        let err = generate_typed::<Toy>(&generator, &toy_request())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
