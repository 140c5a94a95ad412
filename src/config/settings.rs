//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, STORE_AUTH_PATH,
    STORE_REST_PATH, STORE_STORAGE_PATH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Base URL of the hosted backend (data store, auth, object storage)
    pub store_url: String,
    store_api_key: String,
    /// Base URL of the hosted chat completion service
    pub chat_url: String,
    chat_api_key: String,
    pub chat_model: String,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("store_url", &self.store_url)
            .field("store_api_key", &"[REDACTED]")
            .field("chat_url", &self.chat_url)
            .field("chat_api_key", &"[REDACTED]")
            .field("chat_model", &self.chat_model)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics when `STORE_URL` or `STORE_API_KEY` is missing: the service
    /// cannot do anything without its backing store.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let store_url = env::var("STORE_URL")
            .expect("STORE_URL environment variable must be set")
            .trim_end_matches('/')
            .to_string();
        let store_api_key =
            env::var("STORE_API_KEY").expect("STORE_API_KEY environment variable must be set");

        let chat_url = env::var("CHAT_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let chat_api_key = env::var("CHAT_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("CHAT_API_KEY not set, assistant endpoints will be rejected upstream");
            String::new()
        });

        Self {
            store_url,
            store_api_key,
            chat_url,
            chat_api_key,
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Endpoint of the row-oriented REST interface.
    pub fn rest_endpoint(&self) -> String {
        format!("{}{}", self.store_url, STORE_REST_PATH)
    }

    /// Endpoint of the auth provider.
    pub fn auth_endpoint(&self) -> String {
        format!("{}{}", self.store_url, STORE_AUTH_PATH)
    }

    /// Endpoint of the object storage.
    pub fn storage_endpoint(&self) -> String {
        format!("{}{}", self.store_url, STORE_STORAGE_PATH)
    }

    /// API key for the hosted store.
    pub fn store_api_key(&self) -> &str {
        &self.store_api_key
    }

    /// API key for the chat service.
    pub fn chat_api_key(&self) -> &str {
        &self.chat_api_key
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
