//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// provider 호출 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 사용할 provider 식별자(openai/anthropic/gemini). 미지정 시 자동 선택
    pub provider: Option<String>,
    /// 웹 폼 서버 바인드 주소
    pub bind: Option<String>,
    /// provider HTTP 요청 타임아웃(ms)
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub openai: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub gemini: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// provider 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// 모델 식별자(선택)
    pub model: Option<String>,
    /// API 베이스 URL(선택)
    pub api_base: Option<String>,
    /// 인증 키/토큰(직접값)
    pub api_key: Option<String>,
    /// 인증 키/토큰을 읽을 환경변수 이름
    pub api_key_env: Option<String>,
}

/// 지원하는 AI provider 종류. 선언 순서가 자동 선택 우선순위다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Anthropic, Self::Gemini];

    /// 설정 문자열을 provider 종류로 변환한다.
    pub fn from_id(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "gemini" | "google" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }

    /// 설정에 `api_key_env`가 없을 때 읽는 관례적 환경변수.
    pub fn default_api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl Config {
    pub fn bind(&self) -> String {
        self.defaults
            .bind
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.defaults
            .request_timeout_ms
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    /// 명시된 provider 선호값. 알 수 없는 값이면 `Err`로 원문을 돌려준다.
    pub fn preferred_provider(&self) -> Result<Option<ProviderKind>, String> {
        match self.defaults.provider.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => ProviderKind::from_id(raw)
                .map(Some)
                .ok_or_else(|| raw.to_string()),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.providers.merge_from(other.providers);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.provider.is_some() {
            self.provider = other.provider;
        }
        if other.bind.is_some() {
            self.bind = other.bind;
        }
        if other.request_timeout_ms.is_some() {
            self.request_timeout_ms = other.request_timeout_ms;
        }
    }
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        match kind {
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::Anthropic => self.anthropic.as_ref(),
            ProviderKind::Gemini => self.gemini.as_ref(),
        }
    }

    pub fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider(&mut self.openai, other.openai);
        merge_provider(&mut self.anthropic, other.anthropic);
        merge_provider(&mut self.gemini, other.gemini);
    }
}

fn merge_provider(slot: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    let Some(incoming) = incoming else {
        return;
    };
    match slot {
        Some(existing) => existing.merge_from(incoming),
        None => *slot = Some(incoming),
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_key_env.is_some() {
            self.api_key_env = other.api_key_env;
        }
    }
}
