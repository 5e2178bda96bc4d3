//! 설정 값(api key/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{ProviderConfig, ProviderKind};

/// Provider(API key) 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// Provider API key를 해석한다.
/// 우선순위: 직접값 -> `api_key_env` -> provider 관례 환경변수.
pub fn resolve_provider_api_key(
    kind: ProviderKind,
    cfg: Option<&ProviderConfig>,
) -> ProviderCredentialResolution {
    if let Some(key) = cfg
        .and_then(|c| c.api_key.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return ProviderCredentialResolution {
            credential: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = cfg
        .and_then(|c| c.api_key_env.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| kind.default_api_key_env());

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => ProviderCredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => ProviderCredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
