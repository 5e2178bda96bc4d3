//! 조언 요청 화면 컨트롤러 유스케이스.
//!
//! 입력 갱신/제출/응답 반영을 하나의 상태 채널에서 처리한다.
//! 생성 호출은 별도 태스크로 실행되며 동시에 하나만 진행된다.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::ports::AdvisoryClient;
use crate::domain::advice::{FormField, ViewEvent, ViewState};
use crate::domain::prompt::build_prompt;

/// 제출이 거절된 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// 이미 생성 요청이 진행 중이다.
    Busy,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("a generation request is already in flight"),
        }
    }
}

impl std::error::Error for SubmitRejected {}

/// 화면 상태를 소유하고 제출 흐름을 조율하는 컨트롤러.
pub struct ViewController {
    client: Arc<dyn AdvisoryClient>,
    state: Arc<watch::Sender<ViewState>>,
}

impl ViewController {
    pub fn new(client: Arc<dyn AdvisoryClient>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            client,
            state: Arc::new(state),
        }
    }

    /// 현재 화면 스냅샷.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// 상태 전이를 관찰하는 수신기를 만든다.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// 입력 필드 하나를 갱신한다.
    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        debug!(field = field.name(), "field changed");
        dispatch(&self.state, ViewEvent::FieldChanged { field, value });
    }

    /// 현재 입력값으로 생성 요청을 시작한다.
    /// - Loading 중이면 새 요청을 만들지 않고 `Busy`를 반환한다.
    /// - 반환된 핸들을 버려도 태스크는 끝까지 실행되어 상태를 정리한다.
    pub fn submit(&self) -> Result<PendingAdvice, SubmitRejected> {
        let mut prompt = None;
        self.state.send_if_modified(|state| {
            if state.outcome().is_loading() {
                return false;
            }
            *state = state.apply(ViewEvent::SubmitStarted);
            prompt = Some(build_prompt(state.inputs()));
            true
        });

        let Some(prompt) = prompt else {
            debug!("submit ignored: request already in flight");
            return Err(SubmitRejected::Busy);
        };

        let client = Arc::clone(&self.client);
        let guard = SettleGuard::new(Arc::clone(&self.state));
        info!(provider = client.id(), "generation started");

        let task = tokio::spawn(async move {
            let event = match client.generate(&prompt).await {
                Ok(text) => {
                    info!(provider = client.id(), bytes = text.len(), "generation succeeded");
                    ViewEvent::Succeeded(text)
                }
                Err(err) => {
                    warn!(provider = client.id(), "generation failed: {err:#}");
                    ViewEvent::Failed
                }
            };
            guard.settle(event)
        });

        Ok(PendingAdvice {
            task,
            state: Arc::clone(&self.state),
        })
    }

    /// 제출 후 완료까지 기다린다. 진행 중이면 `Busy`.
    pub async fn submit_and_wait(&self) -> Result<ViewState, SubmitRejected> {
        Ok(self.submit()?.settled().await)
    }
}

/// 진행 중인 생성 요청 핸들.
pub struct PendingAdvice {
    task: JoinHandle<ViewState>,
    state: Arc<watch::Sender<ViewState>>,
}

impl PendingAdvice {
    /// 응답 반영이 끝난 화면 스냅샷을 반환한다.
    pub async fn settled(self) -> ViewState {
        match self.task.await {
            Ok(state) => state,
            Err(err) => {
                // 태스크가 중단되어도 가드가 Failure로 정리해 둔다.
                warn!("generation task aborted: {err}");
                self.state.borrow().clone()
            }
        }
    }
}

fn dispatch(state: &watch::Sender<ViewState>, event: ViewEvent) -> ViewState {
    let mut next = None;
    state.send_modify(|current| {
        *current = current.apply(event);
        next = Some(current.clone());
    });
    next.unwrap_or_default()
}

/// Loading 상태를 반드시 벗어나게 하는 가드(finally 역할).
struct SettleGuard {
    state: Arc<watch::Sender<ViewState>>,
    settled: bool,
}

impl SettleGuard {
    fn new(state: Arc<watch::Sender<ViewState>>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, event: ViewEvent) -> ViewState {
        self.settled = true;
        dispatch(&self.state, event)
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.settled {
            dispatch(&self.state, ViewEvent::Failed);
        }
    }
}
