//! 애플리케이션 조립(composition root) 모듈.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{AdvisoryClientFactory, ConfigRepository};
use crate::application::usecases::give_advice::ViewController;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::infrastructure::adapters::{HttpAdvisoryFactory, JsonConfigRepository};
use crate::interface::cli::{self, AskOptions, ServeOptions};
use crate::interface::web;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: Box<dyn ConfigRepository>,
    client_factory: Box<dyn AdvisoryClientFactory>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(Box::new(JsonConfigRepository), Box::new(HttpAdvisoryFactory))
    }
}

impl AppComposition {
    /// 설정 저장소와 클라이언트 팩토리를 외부에서 주입한다.
    pub fn new(
        config_repo: Box<dyn ConfigRepository>,
        client_factory: Box<dyn AdvisoryClientFactory>,
    ) -> Self {
        Self {
            config_repo,
            client_factory,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: self.config_repo.as_ref(),
        }
    }

    /// 설정에 맞는 AI 클라이언트로 화면 컨트롤러를 만든다.
    pub fn view_controller(&self, config: &Config) -> Result<ViewController> {
        let client = self.client_factory.build(config)?;
        Ok(ViewController::new(client))
    }

    /// 웹 폼 서버를 실행한다.
    pub async fn serve(&self, options: ServeOptions) -> Result<()> {
        let config = self.config_repo.load()?;
        let bind: SocketAddr = match options.bind {
            Some(bind) => bind,
            None => cli::command::parse_bind(&config.bind()).map_err(anyhow::Error::msg)?,
        };
        let controller = Arc::new(self.view_controller(&config)?);
        web::serve(controller, bind).await
    }

    /// 터미널 폼을 1회 실행한다. 조언을 받았으면 `true`.
    pub async fn ask(&self, options: AskOptions) -> Result<bool> {
        let config = self.config_repo.load()?;
        let controller = self.view_controller(&config)?;
        cli::run_ask(&controller, options).await
    }
}
