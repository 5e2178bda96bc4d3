//! 터미널용 조언 폼.
//! 누락된 입력은 stdin으로 묻고, 웹 폼과 같은 컨트롤러로 요청한다.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::application::usecases::give_advice::ViewController;
use crate::domain::advice::{FormField, ViewState};

use super::command::AskOptions;

pub const BUSY_INDICATOR: &str = "⠋ Generating advice...";

/// 터미널에 표시할 블록.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalBlock {
    Busy,
    Error(String),
    Advice(String),
    Empty,
}

/// 화면 상태를 터미널 블록으로 변환한다(오류가 결과보다 우선).
pub fn render_terminal(state: &ViewState) -> TerminalBlock {
    let outcome = state.outcome();
    if outcome.is_loading() {
        return TerminalBlock::Busy;
    }
    if let Some(error) = outcome.error() {
        return TerminalBlock::Error(error.to_string());
    }
    if let Some(text) = outcome.result() {
        return TerminalBlock::Advice(text.to_string());
    }
    TerminalBlock::Empty
}

/// 입력을 채우고 요청을 보낸 뒤 결과를 출력한다. 성공 여부를 반환한다.
pub async fn run_ask(controller: &ViewController, options: AskOptions) -> Result<bool> {
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    for field in FormField::ALL {
        let value = match options.value(field) {
            Some(value) => value.to_string(),
            None => {
                let mut stderr = tokio::io::stderr();
                stderr
                    .write_all(format!("{}: ", field.label()).as_bytes())
                    .await?;
                stderr.flush().await?;
                // 줄바꿈만 떼고 입력한 그대로 쓴다.
                stdin
                    .next_line()
                    .await
                    .context("failed to read from stdin")?
                    .unwrap_or_default()
            }
        };
        controller.update_field(field, value);
    }

    let pending = controller.submit()?;
    if let TerminalBlock::Busy = render_terminal(&controller.snapshot()) {
        eprintln!("{BUSY_INDICATOR}");
    }

    let settled = pending.settled().await;
    match render_terminal(&settled) {
        TerminalBlock::Advice(text) => {
            println!("Given Advice\n\n{text}");
            Ok(true)
        }
        TerminalBlock::Error(message) => {
            eprintln!("error: {message}");
            Ok(false)
        }
        TerminalBlock::Busy | TerminalBlock::Empty => Ok(false),
    }
}
