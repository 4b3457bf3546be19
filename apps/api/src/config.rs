use anyhow::{Context, Result};

const DEFAULT_COLLEGE_DATA_PATH: &str = "public/empowering_educ_data.csv";
const DEFAULT_STEPS_DATA_PATH: &str = "public/steps_to_apply.csv";

/// Application configuration loaded from environment variables.
///
/// Upstream API keys are optional at startup: a missing key only disables the
/// routes that need it, which then answer 500 without calling the provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub college_data_path: String,
    pub steps_data_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            groq_api_key: optional_env("GROQ_API_KEY"),
            college_data_path: optional_env("COLLEGE_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_COLLEGE_DATA_PATH.to_string()),
            steps_data_path: optional_env("STEPS_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_STEPS_DATA_PATH.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
