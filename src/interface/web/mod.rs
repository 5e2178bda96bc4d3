//! 웹 폼 인터페이스(axum).
//!
//! `/`는 HTML 폼을, `/api/*`는 같은 화면 상태를 JSON으로 노출한다.

pub mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::application::usecases::give_advice::{SubmitRejected, ViewController};
use crate::domain::advice::{FormField, FormInputs, RequestOutcome, ViewState};

/// 라우터 공유 상태.
#[derive(Clone)]
pub struct WebState {
    controller: Arc<ViewController>,
}

/// 폼/JSON 제출 본문(`input1`/`input2`/`input3`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub input1: String,
    #[serde(default)]
    pub input2: String,
    #[serde(default)]
    pub input3: String,
}

impl FormSubmission {
    fn apply_to(self, controller: &ViewController) {
        controller.update_field(FormField::Salary, self.input1);
        controller.update_field(FormField::Age, self.input2);
        controller.update_field(FormField::Knowledge, self.input3);
    }
}

impl From<&FormInputs> for FormSubmission {
    fn from(inputs: &FormInputs) -> Self {
        Self {
            input1: inputs.salary().to_string(),
            input2: inputs.age().to_string(),
            input3: inputs.knowledge().to_string(),
        }
    }
}

/// 단일 필드 갱신 본문.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeBody {
    Idle,
    Loading,
    Success { text: String },
    Failure { message: String },
}

impl From<&RequestOutcome> for OutcomeBody {
    fn from(outcome: &RequestOutcome) -> Self {
        match outcome {
            RequestOutcome::Idle => Self::Idle,
            RequestOutcome::Loading => Self::Loading,
            RequestOutcome::Success(text) => Self::Success { text: text.clone() },
            RequestOutcome::Failure(message) => Self::Failure {
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StateBody {
    pub inputs: FormSubmission,
    pub outcome: OutcomeBody,
}

impl From<&ViewState> for StateBody {
    fn from(state: &ViewState) -> Self {
        Self {
            inputs: state.inputs().into(),
            outcome: state.outcome().into(),
        }
    }
}

/// 조언 폼 라우터를 구성한다.
pub fn router(controller: Arc<ViewController>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(submit_form_handler))
        .route("/health", get(health_handler))
        .route("/api/state", get(state_handler))
        .route("/api/advice", post(advice_handler))
        .route("/api/fields", patch(field_handler))
        .with_state(WebState { controller })
}

/// 바인드 주소에서 웹 폼을 서비스한다.
pub async fn serve(controller: Arc<ViewController>, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {bind}"))?;
    info!("serving advice form on http://{bind}");

    axum::serve(listener, router(controller))
        .await
        .context("HTTP server error")
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn index_handler(State(state): State<WebState>) -> Html<String> {
    Html(view::render_page(&state.controller.snapshot()))
}

/// 제출을 시작하고 같은 페이지(`/`)로 되돌려 보낸다(303 See Other).
/// - 완료를 기다리지 않으므로 제출한 브라우저가 곧바로 Loading 화면을 받는다.
/// - Loading 중 재제출은 무시되고 진행 중인 화면으로 돌아간다.
async fn submit_form_handler(
    State(state): State<WebState>,
    Form(submission): Form<FormSubmission>,
) -> Redirect {
    let controller = &state.controller;
    submission.apply_to(controller);

    match controller.submit() {
        Ok(_pending) => debug!("form submit started"),
        Err(SubmitRejected::Busy) => debug!("form submit ignored while loading"),
    }
    Redirect::to("/")
}

async fn state_handler(State(state): State<WebState>) -> Json<StateBody> {
    Json(StateBody::from(&state.controller.snapshot()))
}

async fn advice_handler(
    State(state): State<WebState>,
    Json(submission): Json<FormSubmission>,
) -> (StatusCode, Json<OutcomeBody>) {
    let controller = &state.controller;
    submission.apply_to(controller);

    match controller.submit_and_wait().await {
        Ok(settled) => (StatusCode::OK, Json(settled.outcome().into())),
        Err(SubmitRejected::Busy) => (StatusCode::CONFLICT, Json(OutcomeBody::Loading)),
    }
}

async fn field_handler(
    State(state): State<WebState>,
    Json(update): Json<FieldUpdate>,
) -> Response {
    let Some(field) = FormField::from_name(&update.field) else {
        debug!(field = %update.field, "rejected unknown field");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("unknown field: {}", update.field) })),
        )
            .into_response();
    };

    state.controller.update_field(field, update.value);
    Json(StateBody::from(&state.controller.snapshot())).into_response()
}
