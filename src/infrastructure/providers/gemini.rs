//! Google Gemini provider 어댑터.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::application::ports::AdvisoryClient;

use super::api_runner::{ApiBackend, require_text, send_json};

pub struct GeminiProvider {
    api: ApiBackend,
}

impl GeminiProvider {
    pub fn new(api: ApiBackend) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdvisoryClient for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let endpoint = self
            .api
            .endpoint(&format!("models/{}:generateContent", self.api.model));
        let payload = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ]
        });

        // Gemini는 API key(query) 또는 OAuth(Bearer) 방식 모두 허용한다.
        let request = if self.api.credential.starts_with("AIza") {
            let mut url = Url::parse(&endpoint)?;
            url.query_pairs_mut().append_pair("key", &self.api.credential);
            self.api.client.post(url).json(&payload)
        } else {
            self.api
                .client
                .post(endpoint)
                .bearer_auth(&self.api.credential)
                .json(&payload)
        };

        let response = send_json(self.name(), "request Gemini API", request).await?;
        require_text(self.name(), &response, "/candidates/0/content")
    }
}
