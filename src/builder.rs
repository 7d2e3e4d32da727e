use std::time::Duration;

use crate::prelude::*;

const BASE_URL: &str = "https://ww1.gogoanime2.org";

pub struct GogoBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl GogoBuilder {
    /// creates a new builder against the default gogoanime host.
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: crate::client::DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// sets the site base url, for mirrors of the default host.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// pins a user-agent header instead of sampling a random browser one.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// builds a [`GogoClient`] using the configured options.
    pub fn build(&self) -> Result<GogoClient> {
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| crate::client::random_user_agent().to_string());

        GogoClient::with_options(self.base_url.clone(), self.timeout, user_agent)
    }
}

impl Default for GogoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_trims_trailing_slash_from_base_url() {
        let client = GogoBuilder::new()
            .base_url("https://example.test/")
            .build()
            .expect("client should build");
        assert_eq!(client.base_url(), "https://example.test");
    }

    #[test]
    fn builder_defaults_to_gogoanime_host() {
        let client = GogoBuilder::new().build().expect("client should build");
        assert_eq!(client.base_url(), BASE_URL);
    }
}
