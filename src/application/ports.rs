//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 외부 AI 텍스트 생성 호출 포트.
/// 실패 원인(네트워크/타임아웃/비정상 응답)은 호출자에게 구분되지 않는다.
#[async_trait]
pub trait AdvisoryClient: Send + Sync {
    /// 내부 식별자(로그 키)
    fn id(&self) -> &'static str;
    /// 사용자 표시 이름
    fn name(&self) -> &'static str;
    /// 프롬프트 1회 전송(재시도 없음)
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// 설정에 맞는 AI 클라이언트를 구성하는 팩토리 포트.
pub trait AdvisoryClientFactory: Send + Sync {
    fn build(&self, config: &Config) -> Result<Arc<dyn AdvisoryClient>>;
}
