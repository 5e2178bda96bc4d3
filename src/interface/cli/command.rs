//! CLI 명령 파싱 모듈.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use crate::domain::advice::FormField;

#[derive(Debug, Parser)]
#[command(name = "finpilot")]
#[command(about = "AI financial advisor: book and podcast picks for your salary, age and knowledge level")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the advice form over HTTP (default)
    Serve {
        /// Listen address, overrides defaults.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Fill the form in the terminal and print the advice
    Ask {
        /// Salary (input1)
        #[arg(long)]
        salary: Option<String>,
        /// Age (input2)
        #[arg(long)]
        age: Option<String>,
        /// Level of financial knowledge (input3)
        #[arg(long)]
        knowledge: Option<String>,
    },
    /// Show effective merged config and provider selection
    Config,
}

#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub bind: Option<SocketAddr>,
}

#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    pub salary: Option<String>,
    pub age: Option<String>,
    pub knowledge: Option<String>,
}

impl AskOptions {
    /// 명령줄로 미리 받은 필드 값.
    pub fn value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Salary => self.salary.as_deref(),
            FormField::Age => self.age.as_deref(),
            FormField::Knowledge => self.knowledge.as_deref(),
        }
    }
}

#[derive(Debug)]
pub enum CliAction {
    Serve(ServeOptions),
    Ask(AskOptions),
    InspectConfig,
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            None => Ok(CliAction::Serve(ServeOptions::default())),
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            Some(Commands::Serve { bind }) => {
                let bind = bind
                    .map(|raw| parse_bind(&raw))
                    .transpose()?;
                Ok(CliAction::Serve(ServeOptions { bind }))
            }
            Some(Commands::Ask {
                salary,
                age,
                knowledge,
            }) => Ok(CliAction::Ask(AskOptions {
                salary,
                age,
                knowledge,
            })),
        }
    }
}

/// `host:port` 형식의 바인드 주소를 해석한다.
pub fn parse_bind(raw: &str) -> Result<SocketAddr, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid bind address (expected host:port): {raw}"))
}
