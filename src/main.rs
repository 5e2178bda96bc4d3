//! `finpilot` 바이너리 진입점.

use finpilot::interface::cli::{Cli, CliAction};
use finpilot::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Serve(options) => {
            if let Err(err) = composition.serve(options).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::Ask(options) => match composition.ask(options).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
    }
}
