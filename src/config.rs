// Configuration: flags and `GEMINI_*` environment variables are parsed
// once at startup into an immutable `Config` that is passed down
// explicitly. Nothing below this module touches the process environment.

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_API_URL";
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

/// Command-line flags. Each one falls back to its environment variable,
/// then to the built-in default.
#[derive(Parser, Debug)]
#[command(name = "gemini-gpi", version, about = "Ask Gemini from the terminal")]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = MODEL_VAR, default_value = DEFAULT_MODEL, value_parser = NonEmptyStringValueParser::new())]
    pub model: String,

    /// Base URL of the generative language API
    #[arg(long, env = BASE_URL_VAR, default_value = DEFAULT_BASE_URL, value_parser = NonEmptyStringValueParser::new())]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = TIMEOUT_VAR, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Ask a single question and exit instead of opening the menu
    #[arg(short, long)]
    pub prompt: Option<String>,
}

impl Cli {
    pub fn config(&self) -> Config {
        let config = Config::default()
            .with_model(self.model.as_str())
            .with_base_url(self.base_url.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.api_key {
            Some(key) => config.with_api_key(key.as_str()),
            None => config,
        }
    }
}

/// Immutable runtime configuration. `api_key` may be absent: that is a
/// valid state, reported when the user submits rather than at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("gemini-gpi").chain(args.iter().copied()))
    }

    // Only this test writes to the environment, and only `GEMINI_MODEL`;
    // the other tests never assert on the model unless they pass --model.
    #[test]
    fn flag_wins_over_environment() {
        std::env::set_var(MODEL_VAR, "gemini-from-env");
        let from_env = parse(&[]).expect("parse").config();
        let from_flag = parse(&["--model", "gemini-from-flag"]).expect("parse").config();
        std::env::remove_var(MODEL_VAR);

        assert_eq!(from_env.model, "gemini-from-env");
        assert_eq!(from_flag.model, "gemini-from-flag");
    }

    #[test]
    fn flags_build_the_config() {
        let config = parse(&[
            "--api-key",
            "key-123",
            "--model",
            "gemini-1.5-flash",
            "--base-url",
            "http://localhost:9000/",
            "--timeout-secs",
            "5",
            "--prompt",
            "hi",
        ])
        .expect("parse")
        .config();

        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("key-123".to_string())
        );
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn base_url_and_timeout_have_defaults() {
        let config = parse(&[]).expect("parse").config();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn rejects_zero_timeout_and_blank_model() {
        assert!(parse(&["--timeout-secs", "0"]).is_err());
        assert!(parse(&["--timeout-secs", "soon"]).is_err());
        assert!(parse(&["--model", ""]).is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config::default().with_api_key("super-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
    }
}
