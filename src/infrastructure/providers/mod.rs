//! AI provider HTTP 어댑터 모듈.
//! 설정에서 사용할 provider를 고르고 `AdvisoryClient` 구현체를 만든다.

pub mod anthropic;
pub mod gemini;
pub mod openai;
mod api_runner;

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::info;

use crate::application::config::{Config, ProviderKind};
use crate::application::ports::AdvisoryClient;
use crate::infrastructure::config::resolve_provider_api_key;

pub use api_runner::{ApiBackend, build_api_client};

/// 선택된 provider와 해석된 인증 정보.
#[derive(Debug, Clone)]
pub struct ProviderSelection {
    pub kind: ProviderKind,
    pub credential: String,
}

pub fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "gpt-4.1-mini",
        ProviderKind::Anthropic => "claude-3-7-sonnet-latest",
        ProviderKind::Gemini => "gemini-2.0-flash",
    }
}

pub fn default_api_base(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "https://api.openai.com/v1",
        ProviderKind::Anthropic => "https://api.anthropic.com/v1",
        ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
    }
}

/// 사용할 provider를 결정한다.
/// - `defaults.provider`가 있으면 그 provider만 검사한다.
/// - 없으면 openai -> anthropic -> gemini 순으로 인증 가능한 첫 provider를 고른다.
pub fn select_provider(config: &Config) -> Result<ProviderSelection> {
    let preferred = match config.preferred_provider() {
        Ok(preferred) => preferred,
        Err(raw) => bail!("unknown provider in defaults.provider: {raw}"),
    };

    if let Some(kind) = preferred {
        let cfg = config.providers.get(kind);
        if !cfg.map(|c| c.is_enabled()).unwrap_or(true) {
            bail!("provider {} is selected but disabled", kind.id());
        }
        let resolution = resolve_provider_api_key(kind, cfg);
        let Some(credential) = resolution.credential else {
            bail!(
                "provider {} has no API key ({})",
                kind.id(),
                resolution.source.unwrap_or_else(|| "unset".to_string())
            );
        };
        return Ok(ProviderSelection { kind, credential });
    }

    for kind in ProviderKind::ALL {
        let cfg = config.providers.get(kind);
        if !cfg.map(|c| c.is_enabled()).unwrap_or(true) {
            continue;
        }
        if let Some(credential) = resolve_provider_api_key(kind, cfg).credential {
            return Ok(ProviderSelection { kind, credential });
        }
    }

    bail!(
        "no AI provider is configured; set one of OPENAI_API_KEY, ANTHROPIC_API_KEY, GEMINI_API_KEY"
    )
}

/// 설정에 맞는 `AdvisoryClient`를 생성한다.
pub fn build_advisory_client(config: &Config) -> Result<Arc<dyn AdvisoryClient>> {
    let ProviderSelection { kind, credential } = select_provider(config)?;
    let cfg = config.providers.get(kind);

    let api = ApiBackend {
        client: build_api_client(config.request_timeout_ms()),
        base_url: cfg
            .and_then(|c| c.api_base.clone())
            .unwrap_or_else(|| default_api_base(kind).to_string()),
        model: cfg
            .and_then(|c| c.model.clone())
            .unwrap_or_else(|| default_model(kind).to_string()),
        credential,
    };
    info!(provider = kind.id(), model = %api.model, "advisory client ready");

    let client: Arc<dyn AdvisoryClient> = match kind {
        ProviderKind::OpenAi => Arc::new(openai::OpenAiProvider::new(api)),
        ProviderKind::Anthropic => Arc::new(anthropic::AnthropicProvider::new(api)),
        ProviderKind::Gemini => Arc::new(gemini::GeminiProvider::new(api)),
    };
    Ok(client)
}
