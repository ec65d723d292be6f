use async_trait::async_trait;
use gembank_core::assistant::gemini::{self, GenerateContentRequest};
use gembank_core::assistant::{AssistantReply, AssistantRequest, ConversationApi};
use gembank_core::AssistantError;
use gloo_net::http::Request;

use crate::config;

/// Calls `generateContent` straight from the browser with the build-time key.
pub struct GeminiClient {
    api_key: &'static str,
    model: &'static str,
}

impl GeminiClient {
    /// `None` when no key was baked into the build.
    pub fn from_config() -> Option<Self> {
        config::gemini_api_key().map(|api_key| Self {
            api_key,
            model: gemini::MODEL,
        })
    }
}

#[async_trait(?Send)]
impl ConversationApi for GeminiClient {
    async fn send(&self, request: &AssistantRequest) -> Result<AssistantReply, AssistantError> {
        let url = format!(
            "{}?key={}",
            gemini::endpoint(self.model),
            urlencoding::encode(self.api_key)
        );
        let body = GenerateContentRequest::from(request);
        let response = Request::post(&url)
            .json(&body)
            .map_err(|e| AssistantError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(gemini::api_error(status, &text));
        }
        gemini::parse_reply(&text)
    }
}
