use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// Body of `POST /api/v2/optimize` and `POST /api/v2/generate-multi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizeRequest {
    pub input: String,
    pub target_models: Vec<String>,
    pub complexity_level: String,
    pub task_type: String,
    pub language: String,
    pub generate_multi: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_behavior: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultMetadata {
    #[serde(default)]
    pub complexity_level: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub estimated_tokens: Option<u32>,
    #[serde(default)]
    pub target_models: Vec<String>,
    #[serde(default)]
    pub techniques_used: Vec<String>,
}

/// Structured optimization result as returned by the v2 endpoints. Every
/// field but `optimized_prompt` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultEnvelope {
    #[serde(default)]
    pub optimized_prompt: String,
    #[serde(default)]
    pub usage_guide: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub optimization_notes: Option<String>,
    #[serde(default)]
    pub metadata: Option<ResultMetadata>,
    #[serde(default)]
    pub model_versions: BTreeMap<String, String>,
}

impl ResultEnvelope {
    /// Lifts a v1 flat-string result into the structured shape.
    pub fn from_plain(optimized_prompt: String) -> Self {
        Self {
            optimized_prompt,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Failure taxonomy of one API call. The `Display` text is the user-facing
/// message; transport details ride along for the logs only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// The server answered with an `error` field; surfaced verbatim.
    #[error("{message}")]
    Server { message: String },
    /// Non-success HTTP status without a usable server message.
    #[error("server error: {status}")]
    Http { status: u16 },
    /// Connection could not be established at all.
    #[error("network connection lost")]
    Offline { detail: String },
    /// Transport failure or malformed response body.
    #[error("unknown error occurred")]
    Network { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Model list, either from the backend or the built-in fallback.
    ModelsLoaded(Vec<ModelInfo>),
    /// Settlement of one optimize/batch request.
    RequestCompleted {
        request_id: RequestId,
        result: Result<ResultEnvelope, ApiFailure>,
    },
}
