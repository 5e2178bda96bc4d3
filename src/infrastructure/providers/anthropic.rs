//! Anthropic/Claude Messages provider 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::AdvisoryClient;

use super::api_runner::{ApiBackend, require_text, send_json};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

pub struct AnthropicProvider {
    api: ApiBackend,
}

impl AnthropicProvider {
    pub fn new(api: ApiBackend) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdvisoryClient for AnthropicProvider {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    fn name(&self) -> &'static str {
        "Claude"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.api.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let request = self
            .api
            .client
            .post(self.api.endpoint("messages"))
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload);

        // Anthropic API key(sk-ant-...)와 OAuth/Bearer 토큰을 모두 수용한다.
        let request = if self.api.credential.starts_with("sk-ant-") {
            request.header("x-api-key", &self.api.credential)
        } else {
            request.bearer_auth(&self.api.credential)
        };

        let response = send_json(self.name(), "request Anthropic API", request).await?;
        require_text(self.name(), &response, "/content")
    }
}
