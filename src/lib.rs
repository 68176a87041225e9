// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `config`: runtime configuration, read once at startup.
// - `api`: the Gemini `generateContent` client and response validation.
// - `session`: the request controller and its state machine.
// - `formatter`: splits model output into titles, features and paragraphs.
// - `render`: prints formatted segments to the terminal.
// - `ui`: interactive menu and one-shot mode on top of `session`.
// - `error`: error types shared by the above.
pub mod api;
pub mod config;
pub mod error;
pub mod formatter;
pub mod render;
pub mod session;
pub mod ui;
