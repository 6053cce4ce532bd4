//! Client-side configuration shared by the dispatcher and the screen client.

use std::time::Duration;
use url::Url;

/// Where the backend lives and how the client talks to it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base every relative action/screen URL is resolved against.
    pub base_url: Url,
    /// Per-request timeout. No retry happens on top of it.
    pub request_timeout: Duration,
    /// Route the dispatcher replace-navigates to after a LOGOUT action.
    pub login_route: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Local development backend.
            base_url: Url::parse("http://localhost:8080").expect("static URL parses"),
            request_timeout: Duration::from_secs(15),
            login_route: "/auth".to_string(),
        }
    }
}
