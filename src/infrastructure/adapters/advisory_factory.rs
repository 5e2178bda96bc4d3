//! AI 클라이언트 팩토리 포트 구현 어댑터.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{AdvisoryClient, AdvisoryClientFactory};
use crate::infrastructure::providers;

/// 설정 기반 HTTP provider 팩토리.
pub struct HttpAdvisoryFactory;

impl AdvisoryClientFactory for HttpAdvisoryFactory {
    fn build(&self, config: &Config) -> Result<Arc<dyn AdvisoryClient>> {
        providers::build_advisory_client(config)
    }
}
