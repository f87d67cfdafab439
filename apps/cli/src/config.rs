use crate::api_client::DEFAULT_API_URL;

/// Client configuration loaded from environment variables. Everything has
/// a default, so startup never fails on configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the roast service, e.g. `http://localhost:8000/api/v1`.
    pub api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            api_url: std::env::var("ROAST_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
