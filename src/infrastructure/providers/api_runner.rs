//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

/// 한 provider 호출에 필요한 접속 정보.
pub struct ApiBackend {
    pub client: Client,
    pub base_url: String,
    pub model: String,
    pub credential: String,
}

impl ApiBackend {
    /// 베이스 URL 뒤에 경로를 붙인다.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Provider API 호출용 HTTP 클라이언트를 생성한다.
pub fn build_api_client(timeout_ms: u64) -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// JSON 응답을 기대하는 요청을 전송하고 실패/파싱 오류를 표준화한다.
pub async fn send_json(
    provider_name: &str,
    action: &str,
    request: RequestBuilder,
) -> Result<Value> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{provider_name}: failed to {action}"))?;

    let status = response.status();
    debug!(provider = provider_name, %status, "provider responded");
    let body = response
        .text()
        .await
        .with_context(|| format!("{provider_name}: failed to read {action} response body"))?;

    if !status.is_success() {
        bail!("{provider_name}: {action} failed ({status}): {body}");
    }

    serde_json::from_str(&body)
        .with_context(|| format!("{provider_name}: invalid JSON response while {action}"))
}

/// 응답의 지정 위치에서 텍스트를 꺼내고, 공백뿐이면 실패로 처리한다.
/// 반환값은 받은 그대로다(공백 제거 없음).
pub fn require_text(provider_name: &str, response: &Value, pointer: &str) -> Result<String> {
    let text = response
        .pointer(pointer)
        .map(collect_text)
        .unwrap_or_default();
    if text.trim().is_empty() {
        bail!("{provider_name}: empty response content");
    }
    Ok(text)
}

/// API 응답 구조에서 텍스트를 재귀적으로 추출한다.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.to_string(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(""),
        Value::Object(map) => ["text", "message", "content", "parts", "output_text"]
            .iter()
            .filter_map(|key| map.get(*key))
            .map(collect_text)
            .find(|text| !text.is_empty())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
