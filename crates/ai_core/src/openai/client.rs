//! OpenAI-compatible chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage,
};

/// Chat completion engine for OpenAI-compatible servers
pub struct OpenAiChatEngine {
    client: Client,
    config: InferenceConfig,
}

impl std::fmt::Debug for OpenAiChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenAiChatEngine {
    /// Create a new engine
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            authenticated = config.has_api_key(),
            "Initialized chat completion engine"
        );

        Ok(Self { client, config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.config.timeout_ms)
        } else {
            InferenceError::from(err)
        }
    }

    /// Turn a non-success response into an error, keeping the server's message
    async fn error_from_response(response: Response) -> InferenceError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or(body);

        warn!(status = %status, detail = %detail, "Chat completion request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InferenceError::Unauthorized(detail),
            StatusCode::NOT_FOUND => InferenceError::ModelNotAvailable(detail),
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            s if s.is_server_error() => {
                InferenceError::ServerError(format!("Status {s}: {detail}"))
            },
            s => InferenceError::RequestFailed(format!("Status {s}: {detail}")),
        }
    }
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [InferenceMessage],
    temperature: f32,
    max_tokens: u32,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Models list response body
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Error body returned by OpenAI-compatible servers
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl InferenceEngine for OpenAiChatEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request), messages = request.messages.len()))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();

        let body = ChatCompletionsRequest {
            model: &model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
        };

        debug!("Sending chat completion request");

        let response = self
            .authorize(self.client.post(self.api_url("chat/completions")))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let first = parsed.choices.into_iter().next();
        let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
        let content = first
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        debug!(
            tokens = ?parsed.usage,
            finish_reason = ?finish_reason,
            "Chat completion finished"
        );

        Ok(InferenceResponse {
            content,
            model: parsed.model.unwrap_or(model),
            usage: parsed.usage,
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .authorize(self.client.get(self.api_url("models")))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) if e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let response = self
            .authorize(self.client.get(self.api_url("models")))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let models: ModelsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(models.data.into_iter().map(|m| m.id).collect())
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(base_url: &str) -> OpenAiChatEngine {
        OpenAiChatEngine::new(InferenceConfig::default().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn api_url_joins_v1_path() {
        let engine = engine("http://localhost:8080/");
        assert_eq!(
            engine.api_url("/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn request_model_overrides_default() {
        let engine = engine("http://localhost:8080");
        let request = InferenceRequest::simple("hi").with_model("other");
        assert_eq!(engine.resolve_model(&request), "other");
        let request = InferenceRequest::simple("hi");
        assert_eq!(engine.resolve_model(&request), "gpt-4.1-mini");
    }

    #[test]
    fn request_body_shape() {
        let messages = vec![InferenceMessage {
            role: "user".to_string(),
            content: "hello".to_string(),
        }];
        let body = ChatCompletionsRequest {
            model: "gpt-4.1-mini",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 400,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4.1-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 400);
    }

    #[test]
    fn response_without_content_parses() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatCompletionsResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.as_ref().unwrap().content.is_none());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let engine = OpenAiChatEngine::new(InferenceConfig::default().with_api_key("sk-hidden"))
            .unwrap();
        assert!(!format!("{engine:?}").contains("sk-hidden"));
    }
}
