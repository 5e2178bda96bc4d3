//! OpenAI Chat Completions provider 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::AdvisoryClient;

use super::api_runner::{ApiBackend, require_text, send_json};

pub struct OpenAiProvider {
    api: ApiBackend,
}

impl OpenAiProvider {
    pub fn new(api: ApiBackend) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdvisoryClient for OpenAiProvider {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.api.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let request = self
            .api
            .client
            .post(self.api.endpoint("chat/completions"))
            .bearer_auth(&self.api.credential)
            .json(&payload);

        let response = send_json(self.name(), "request OpenAI API", request).await?;
        require_text(self.name(), &response, "/choices/0/message")
    }
}
