// Entrypoint for the CLI application.
// - Keeps `main` small: parse configuration, build the client and the
//   request controller, then hand over to the UI.
// - Returns `anyhow::Result` so a failed one-shot run exits non-zero.

use clap::Parser;
use gemini_gpi::{
    api::GeminiClient,
    config::Cli,
    session::RequestController,
    ui::{main_menu, run_once},
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::debug!(model = %config.model, base_url = %config.base_url, "configuration loaded");

    let client = GeminiClient::new(&config)?;
    let controller = RequestController::new(client, config.model.clone(), config.api_key.clone());

    match cli.prompt {
        Some(prompt) => run_once(controller, prompt),
        None => main_menu(controller),
    }
}
