//! CLI 인터페이스 모듈 묶음.
//! 명령 파싱과 터미널 폼을 한 네임스페이스로 관리한다.

pub mod ask;
pub mod command;

pub use ask::run_ask;
pub use command::{AskOptions, Cli, CliAction, ServeOptions};
