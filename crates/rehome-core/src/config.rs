use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Base URL of the platform's REST API, without a trailing slash.
    pub api_base: String,
    /// Bearer token attached to every request. `None` for anonymous
    /// calls during development against a local backend.
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
}

impl CoreConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            auth_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000/api/v1")
    }
}
