//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_provider_api_key;
use crate::application::config::{Config, DefaultsConfig, ProviderKind};
use crate::infrastructure::providers::{default_api_base, default_model, select_provider};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub providers: ProvidersInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub bind: String,
    pub request_timeout_ms: u64,
    /// 실제로 사용될 provider (없으면 선택 실패 사유)
    pub selected_provider: Option<String>,
    pub selection_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvidersInspection {
    pub openai: ProviderInspection,
    pub anthropic: ProviderInspection,
    pub gemini: ProviderInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub configured: bool,
    pub enabled: bool,
    pub model: String,
    pub api_base: String,
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let (selected_provider, selection_error) = match select_provider(config) {
            Ok(selection) => (Some(selection.kind.id().to_string()), None),
            Err(err) => (None, Some(format!("{err:#}"))),
        };

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                bind: config.bind(),
                request_timeout_ms: config.request_timeout_ms(),
                selected_provider,
                selection_error,
            },
            providers: ProvidersInspection {
                openai: ProviderInspection::inspect(config, ProviderKind::OpenAi),
                anthropic: ProviderInspection::inspect(config, ProviderKind::Anthropic),
                gemini: ProviderInspection::inspect(config, ProviderKind::Gemini),
            },
        }
    }
}

impl ProviderInspection {
    fn inspect(config: &Config, kind: ProviderKind) -> Self {
        let cfg = config.providers.get(kind);
        let resolution = resolve_provider_api_key(kind, cfg);

        Self {
            configured: cfg.is_some(),
            enabled: cfg.map(|c| c.is_enabled()).unwrap_or(true),
            model: cfg
                .and_then(|c| c.model.clone())
                .unwrap_or_else(|| default_model(kind).to_string()),
            api_base: cfg
                .and_then(|c| c.api_base.clone())
                .unwrap_or_else(|| default_api_base(kind).to_string()),
            api_key_resolved: resolution.credential.is_some(),
            api_key_source: resolution.source,
        }
    }
}
