//! Build-time Configuration
//!
//! Values baked in at compile time from the environment, with defaults for
//! local development.

/// Base URL of the REST API (no trailing slash)
const API_URL: Option<&str> = option_env!("GAME_LIST_API_URL");
/// LocalStorage key holding the session
const SESSION_KEY: Option<&str> = option_env!("GAME_LIST_SESSION_KEY");

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_SESSION_KEY: &str = "game_list_session";

/// How long a toast stays on screen
pub const TOAST_MILLIS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub session_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(API_URL, SESSION_KEY)
    }

    fn from_values(api_url: Option<&str>, session_key: Option<&str>) -> Self {
        let api_url = api_url
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let session_key = session_key
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SESSION_KEY)
            .to_string();
        Self { api_url, session_key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_values(None, Some(""));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::from_values(Some("https://games.example/api/"), None);
        assert_eq!(config.api_url, "https://games.example/api");
    }
}
