//! `finpilot` 바이너리 통합 테스트(mock provider 사용).

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const ADVICE: &str = "Title: The Psychology of Money...";
const FAILURE_MESSAGE: &str = "Failed to generate text. Please try again.";

/// 사용자/작업 디렉터리 설정이 섞이지 않도록 격리된 실행 환경.
struct TestContext {
    root: TempDir,
    config_path: PathBuf,
}

impl TestContext {
    fn new(api_base: &str) -> Self {
        let root = TempDir::new().expect("temp dir");
        let config_path = root.path().join("finpilot.json");
        let config = json!({
            "defaults": { "provider": "openai", "request_timeout_ms": 5000 },
            "providers": {
                "openai": { "api_base": api_base, "api_key": "sk-test", "model": "gpt-test" }
            }
        });
        fs::write(&config_path, config.to_string()).expect("write config");
        Self { root, config_path }
    }

    fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("finpilot").expect("finpilot binary");
        cmd.current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join(".config"))
            .env("FINPILOT_CONFIG", &self.config_path)
            .env_remove("RUST_LOG");
        cmd
    }
}

fn chat_reply(text: &str) -> String {
    json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] }).to_string()
}

#[test]
fn ask_prints_advice_and_exits_zero() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(r"Salary Range: 50000\\nAge: 30\\n".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_reply(ADVICE))
        .create();
    let ctx = TestContext::new(&server.url());

    ctx.cli()
        .args(["ask", "--salary", "50000", "--age", "30", "--knowledge", "beginner"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Given Advice\n\n{ADVICE}")))
        .stderr(predicate::str::contains("Generating advice"));

    mock.assert();
}

#[test]
fn ask_reports_failure_and_exits_one() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create();
    let ctx = TestContext::new(&server.url());

    ctx.cli()
        .args(["ask", "--salary", "50000", "--age", "30", "--knowledge", "beginner"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Given Advice").not())
        .stderr(predicate::str::contains(format!("error: {FAILURE_MESSAGE}")))
        .stderr(predicate::str::contains("upstream exploded").not());
}

#[test]
fn ask_prompts_for_missing_values_on_stdin() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(
            r"Age:  31 \\nLevel of Financial Knowledge: expert\\n".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_reply(ADVICE))
        .create();
    let ctx = TestContext::new(&server.url());

    ctx.cli()
        .args(["ask", "--salary", "50000", "--age", " 31 "])
        .write_stdin("expert\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter your level of financial knowledge: "))
        .stdout(predicate::str::contains(ADVICE));

    mock.assert();
}

#[test]
fn config_prints_effective_provider_without_secret() {
    let ctx = TestContext::new("http://127.0.0.1:1");

    ctx.cli()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"selected_provider\": \"openai\""))
        .stdout(predicate::str::contains("sk-test").not());
}

#[test]
fn missing_explicit_config_file_exits_one() {
    let ctx = TestContext::new("http://127.0.0.1:1");

    ctx.cli()
        .env("FINPILOT_CONFIG", ctx.root.path().join("absent.json"))
        .args(["ask", "--salary", "1", "--age", "2", "--knowledge", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FINPILOT_CONFIG points to a missing file"));
}

#[test]
fn unknown_subcommand_exits_two() {
    let ctx = TestContext::new("http://127.0.0.1:1");

    ctx.cli().arg("frobnicate").assert().code(2);
}
