// UI layer: a simple interactive menu using `dialoguer`, plus a one-shot
// entry point. All state changes go through the request controller.

use crate::api::GenerativeModel;
use crate::render::{render_error, render_response};
use crate::session::RequestController;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user chooses
/// "Exit". A failed request is shown and the loop carries on.
pub fn main_menu<M: GenerativeModel>(mut controller: RequestController<M>) -> Result<()> {
    if !controller.has_credential() {
        println!("No API key found. Set GEMINI_API_KEY or pass --api-key.");
    }
    loop {
        let items = vec!["Ask a question", "Show last response", "Exit"];
        let selection = Select::new()
            .with_prompt("Gemini GPI")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => {
                let query: String = Input::new()
                    .with_prompt("Enter your query")
                    .with_initial_text(controller.prompt())
                    .allow_empty(true)
                    .interact_text()?;
                controller.set_prompt(query);
                submit_with_spinner(&mut controller);
                show_outcome(&controller)?;
            }
            1 => match controller.latest() {
                Some(response) => render_response(&mut io::stdout(), response)?,
                None => println!("Nothing to show yet."),
            },
            2 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Submit `prompt` once and print the outcome. Used for `--prompt`.
pub fn run_once<M: GenerativeModel>(
    mut controller: RequestController<M>,
    prompt: String,
) -> Result<()> {
    controller.set_prompt(prompt);
    submit_with_spinner(&mut controller);
    if let Some(message) = controller.error() {
        anyhow::bail!("{message}");
    }
    show_outcome(&controller)
}

fn submit_with_spinner<M: GenerativeModel>(controller: &mut RequestController<M>) {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    // The error is already stored on the controller for display.
    let _ = controller.submit();
    spinner.finish_and_clear();
}

fn show_outcome<M: GenerativeModel>(controller: &RequestController<M>) -> Result<()> {
    let mut stdout = io::stdout();
    if let Some(message) = controller.error() {
        render_error(&mut io::stderr(), message)?;
    } else if let Some(response) = controller.latest() {
        if response.candidates.is_empty() {
            println!("The model returned no answer.");
        }
        render_response(&mut stdout, response)?;
    }
    Ok(())
}
