use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ApiFailure, ModelInfo, OptimizeRequest, ResultEnvelope};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// No request deadline by default: a hung request leaves the UI busy,
    /// which is a known gap rather than something this client papers over.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8092".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait ApiBackend: Send + Sync {
    async fn optimize(&self, request: &OptimizeRequest) -> Result<ResultEnvelope, ApiFailure>;
    async fn generate_multi(&self, request: &OptimizeRequest)
        -> Result<ResultEnvelope, ApiFailure>;
    /// v1 compatibility endpoint: flat string in, flat string out.
    async fn optimize_v1(&self, input: &str) -> Result<ResultEnvelope, ApiFailure>;
    async fn models(&self) -> Result<Vec<ModelInfo>, ApiFailure>;
}

/// `{result: ..., error: ...}` wrapper shared by every endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiEnvelope<T> {
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, serde::Serialize)]
struct PlainOptimizeRequest<'a> {
    input: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiFailure> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| ApiFailure::Network {
            detail: err.to_string(),
        })?;
        Ok(Self { settings, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.base_url.trim_end_matches('/'))
    }

    async fn post_envelope<B, T>(&self, path: &str, body: &B) -> Result<T, ApiFailure>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        unwrap_envelope(response).await
    }
}

#[async_trait::async_trait]
impl ApiBackend for ReqwestBackend {
    async fn optimize(&self, request: &OptimizeRequest) -> Result<ResultEnvelope, ApiFailure> {
        self.post_envelope("/api/v2/optimize", request).await
    }

    async fn generate_multi(
        &self,
        request: &OptimizeRequest,
    ) -> Result<ResultEnvelope, ApiFailure> {
        self.post_envelope("/api/v2/generate-multi", request).await
    }

    async fn optimize_v1(&self, input: &str) -> Result<ResultEnvelope, ApiFailure> {
        let text: String = self
            .post_envelope("/api/optimize", &PlainOptimizeRequest { input })
            .await?;
        Ok(ResultEnvelope::from_plain(text))
    }

    async fn models(&self) -> Result<Vec<ModelInfo>, ApiFailure> {
        let response = self
            .client
            .get(self.url("/api/v2/models"))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure::Http {
                status: status.as_u16(),
            });
        }
        let parsed: ModelsResponse = response.json().await.map_err(|err| ApiFailure::Network {
            detail: err.to_string(),
        })?;
        Ok(parsed.models)
    }
}

/// Classifies the response body. A server-supplied `error` field wins over
/// the generic status message; a success status without a `result` is
/// treated as a malformed response.
async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiFailure> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    let parsed: Result<ApiEnvelope<T>, _> = serde_json::from_slice(&body);

    match parsed {
        Ok(envelope) => {
            if let Some(message) = envelope.error.filter(|msg| !msg.is_empty()) {
                return Err(ApiFailure::Server { message });
            }
            if !status.is_success() {
                return Err(ApiFailure::Http {
                    status: status.as_u16(),
                });
            }
            envelope.result.ok_or_else(|| ApiFailure::Network {
                detail: "response missing result field".to_string(),
            })
        }
        Err(_) if !status.is_success() => Err(ApiFailure::Http {
            status: status.as_u16(),
        }),
        Err(err) => Err(ApiFailure::Network {
            detail: format!("malformed response body: {err}"),
        }),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiFailure {
    if err.is_connect() {
        return ApiFailure::Offline {
            detail: err.to_string(),
        };
    }
    ApiFailure::Network {
        detail: err.to_string(),
    }
}

/// Built-in model list used when `GET /api/v2/models` is unreachable.
pub fn default_models() -> Vec<ModelInfo> {
    [
        ("claude", "Claude 4 (Sonnet/Opus)", "Anthropic's Claude 4 family"),
        ("gpt", "GPT-4.1/GPT-4o", "OpenAI's GPT-4 family"),
        ("gemini", "Gemini 2.5 Pro", "Google's Gemini with a large context window"),
        ("deepseek", "DeepSeek R1", "DeepSeek's reasoning model"),
    ]
    .into_iter()
    .map(|(id, name, description)| ModelInfo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}
