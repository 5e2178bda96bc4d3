//! 웹 폼/JSON API 통합 테스트.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use finpilot::application::config::{Config, ProviderConfig};
use finpilot::application::ports::AdvisoryClient;
use finpilot::application::usecases::give_advice::ViewController;
use finpilot::domain::advice::FAILURE_MESSAGE;
use finpilot::infrastructure::providers::build_advisory_client;
use finpilot::interface::web::router;
use serde_json::{Value, json};
use tokio::sync::Notify;
use tower::ServiceExt;

const ADVICE: &str = "Title: The Psychology of Money...";

struct StubClient {
    reply: Option<&'static str>,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl AdvisoryClient for StubClient {
    fn id(&self) -> &'static str {
        "stub"
    }

    fn name(&self) -> &'static str {
        "Stub"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.reply {
            Some(text) => Ok(text.to_string()),
            None => bail!("timed out"),
        }
    }
}

fn controller(reply: Option<&'static str>, gate: Option<Arc<Notify>>) -> Arc<ViewController> {
    Arc::new(ViewController::new(Arc::new(StubClient { reply, gate })))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn redirect_target(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default();
    (response.status(), location)
}

async fn wait_settled(controller: &ViewController) {
    let mut states = controller.subscribe();
    tokio::time::timeout(
        Duration::from_secs(5),
        states.wait_for(|state| !state.outcome().is_loading()),
    )
    .await
    .expect("generation should settle")
    .unwrap();
}

fn openai_config(api_base: &str, timeout_ms: u64) -> Config {
    let mut config = Config::default();
    config.defaults.provider = Some("openai".to_string());
    config.defaults.request_timeout_ms = Some(timeout_ms);
    config.providers.openai = Some(ProviderConfig {
        api_base: Some(api_base.to_string()),
        api_key: Some("sk-test".to_string()),
        ..ProviderConfig::default()
    });
    config
}

#[tokio::test]
async fn index_renders_empty_form() {
    let app = router(controller(Some(ADVICE), None));

    let (status, html) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("AI FINANCIAL ADVISOR"));
    assert!(html.contains("name=\"input1\""));
    assert!(html.contains(">Give Advice</button>"));
    assert!(!html.contains("Given Advice"));
}

#[tokio::test]
async fn form_submit_redirects_then_renders_advice_verbatim() {
    let controller = controller(Some(ADVICE), None);
    let app = router(controller.clone());

    let (status, location) =
        redirect_target(&app, form_post("input1=50000&input2=30&input3=beginner")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    wait_settled(&controller).await;
    let (status, html) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&format!("<p>{ADVICE}</p>")));
    assert!(!html.contains("class=\"error\""));
    assert!(!html.contains("class=\"spinner\""));
    assert!(html.contains("value=\"50000\""));
    assert!(html.contains("value=\"beginner\""));
}

#[tokio::test]
async fn form_submit_failure_renders_fixed_message() {
    let controller = controller(None, None);
    let app = router(controller.clone());

    let (status, _) = redirect_target(&app, form_post("input1=50000&input2=30&input3=beginner")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    wait_settled(&controller).await;
    let (_, html) = send(&app, get("/")).await;

    assert!(html.contains(FAILURE_MESSAGE));
    assert!(!html.contains("Given Advice"));
    assert!(!html.contains("class=\"spinner\""));
}

#[tokio::test]
async fn submitter_sees_loading_page_until_settled() {
    let gate = Arc::new(Notify::new());
    let controller = controller(Some(ADVICE), Some(gate.clone()));
    let app = router(controller.clone());

    // 생성이 막혀 있어도 제출 응답은 바로 돌아와야 한다.
    let (status, location) = tokio::time::timeout(
        Duration::from_secs(5),
        redirect_target(&app, form_post("input1=50000&input2=30&input3=beginner")),
    )
    .await
    .expect("form submit must not wait for generation");
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("class=\"spinner\""));
    assert!(html.contains("<button type=\"submit\" disabled"));
    assert!(html.contains("http-equiv=\"refresh\""));
    assert!(!html.contains("Give Advice"));

    // Loading 중 재제출은 진행 중인 화면으로 되돌아간다.
    let (status, _) = redirect_target(&app, form_post("input1=1&input2=2&input3=3")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(controller.snapshot().outcome().is_loading());

    gate.notify_one();
    wait_settled(&controller).await;

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains(">Give Advice</button>"));
    assert!(html.contains(&format!("<p>{ADVICE}</p>")));
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn json_advice_reports_success_and_failure() {
    let ok_app = router(controller(Some(ADVICE), None));
    let (status, body) = send(
        &ok_app,
        json_request(
            "POST",
            "/api/advice",
            json!({ "input1": "50000", "input2": "30", "input3": "beginner" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({ "status": "success", "text": ADVICE }));

    let failing_app = router(controller(None, None));
    let (_, body) = send(&failing_app, json_request("POST", "/api/advice", json!({}))).await;
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({ "status": "failure", "message": FAILURE_MESSAGE }));
}

#[tokio::test]
async fn loading_state_is_observable_and_blocks_second_submit() {
    let gate = Arc::new(Notify::new());
    let controller = controller(Some(ADVICE), Some(gate.clone()));
    let app = router(controller.clone());

    let pending = controller.submit().unwrap();

    let (_, state) = send(&app, get("/api/state")).await;
    let state: Value = serde_json::from_str(&state).unwrap();
    assert_eq!(state["outcome"], json!({ "status": "loading" }));

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("<button type=\"submit\" disabled"));
    assert!(!html.contains("Give Advice"));

    let (status, body) = send(&app, json_request("POST", "/api/advice", json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "status": "loading" })
    );

    gate.notify_one();
    let settled = pending.settled().await;
    assert_eq!(settled.outcome().result(), Some(ADVICE));

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains(">Give Advice</button>"));
    assert!(html.contains(&format!("<p>{ADVICE}</p>")));
}

#[tokio::test]
async fn field_patch_updates_one_field() {
    let app = router(controller(Some(ADVICE), None));

    let (status, body) = send(
        &app,
        json_request("PATCH", "/api/fields", json!({ "field": "input2", "value": "31" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body["inputs"],
        json!({ "input1": "", "input2": "31", "input3": "" })
    );
    assert_eq!(body["outcome"], json!({ "status": "idle" }));

    let (status, _) = send(
        &app,
        json_request("PATCH", "/api/fields", json!({ "field": "salary", "value": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_is_ok() {
    let app = router(controller(Some(ADVICE), None));
    assert_eq!(send(&app, get("/health")).await, (StatusCode::OK, "ok".to_string()));
}

#[tokio::test]
async fn end_to_end_against_mock_provider() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "choices": [{ "message": { "content": ADVICE } }] }).to_string())
        .create_async()
        .await;

    let client = build_advisory_client(&openai_config(&server.url(), 5_000)).unwrap();
    let controller = Arc::new(ViewController::new(client));
    let app = router(controller.clone());

    let (status, _) = redirect_target(&app, form_post("input1=50000&input2=30&input3=beginner")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    wait_settled(&controller).await;
    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains(&format!("<p>{ADVICE}</p>")));
}

#[tokio::test]
async fn provider_timeout_renders_fixed_message() {
    // 연결은 받지만 응답하지 않는 리스너.
    let silent = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", silent.local_addr().unwrap());

    let client = build_advisory_client(&openai_config(&base, 50)).unwrap();
    let controller = Arc::new(ViewController::new(client));
    let app = router(controller.clone());

    let (status, _) = redirect_target(&app, form_post("input1=50000&input2=30&input3=beginner")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    wait_settled(&controller).await;
    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains(&format!("role=\"alert\">{FAILURE_MESSAGE}</div>")));
    assert!(!html.contains("Given Advice"));
    drop(silent);
}
