//! Leaderboard client
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::{debug, error};
use std::future::Future;
use thiserror::Error;

use super::fetcher::{wake_and_fetch, FetchError, RetryOptions};
use super::model::LeaderboardSnapshot;

/// Why a leaderboard could not be shown. The display form is user-facing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardFailure {
    #[error("PARSE_ERROR")]
    ParseError,

    #[error("WAKE_TIMEOUT_ASSUMPTION")]
    WakeTimeout,
}

impl From<&FetchError> for LeaderboardFailure {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Decode(_) => LeaderboardFailure::ParseError,
            FetchError::MaxWaitExceeded | FetchError::Request(_) => LeaderboardFailure::WakeTimeout,
        }
    }
}

#[derive(Clone)]
pub struct LeaderboardClient {
    http: reqwest::Client,
    url: String,
    options: RetryOptions,
}

impl LeaderboardClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("acwoc-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
            options: RetryOptions::default(),
        })
    }

    pub fn with_options(mut self, options: RetryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and validate a fresh snapshot
    ///
    /// Never fails loudly: every problem is logged and folded into a
    /// [`LeaderboardFailure`].
    pub async fn fetch_leaderboard<F, Fut>(
        &self,
        on_waking: F,
    ) -> Result<LeaderboardSnapshot, LeaderboardFailure>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let body = wake_and_fetch(&self.http, &self.url, on_waking, self.options)
            .await
            .map_err(|e| {
                error!("[LEADERBOARD_FETCH] {e}");
                LeaderboardFailure::from(&e)
            })?;

        LeaderboardSnapshot::from_value(body).map_err(|e| {
            error!("[LEADERBOARD_FETCH] PARSE ERROR: {e}");
            LeaderboardFailure::ParseError
        })
    }

    /// Single best-effort GET, used to keep a sleeping backend warm
    pub async fn ping(&self) {
        match self
            .http
            .get(&self.url)
            .timeout(self.options.request_timeout)
            .send()
            .await
        {
            Ok(response) => debug!("Leaderboard keep-alive ping: HTTP {}", response.status()),
            Err(e) => debug!("Leaderboard keep-alive ping failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::leaderboard::model::tests::sample_body;
    use crate::test_support::{spawn_flaky, spawn_plain_text, ALWAYS_FAILING};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn client(url: &str) -> LeaderboardClient {
        LeaderboardClient::new(url)
            .unwrap()
            .with_options(RetryOptions {
                request_timeout: Duration::from_millis(200),
                retry_delay: Duration::from_millis(10),
                max_wait: Duration::from_millis(300),
            })
    }

    #[test]
    fn test_failure_codes() {
        assert_eq!(LeaderboardFailure::ParseError.to_string(), "PARSE_ERROR");
        assert_eq!(
            LeaderboardFailure::WakeTimeout.to_string(),
            "WAKE_TIMEOUT_ASSUMPTION"
        );
    }

    #[tokio::test]
    async fn test_fetch_valid_snapshot() {
        let (url, _) = spawn_flaky(1, sample_body()).await;

        let snapshot = client(&url)
            .fetch_leaderboard(|| async {})
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.at_rank(1).unwrap().login, "Octocat");
    }

    #[tokio::test]
    async fn test_missing_streak_is_parse_error() {
        let mut body = sample_body();
        body["leaderboard"][1]
            .as_object_mut()
            .unwrap()
            .remove("streak");
        let (url, _) = spawn_flaky(0, body).await;

        let result = client(&url).fetch_leaderboard(|| async {}).await;
        assert_eq!(result.unwrap_err(), LeaderboardFailure::ParseError);
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let url = spawn_plain_text().await;
        let result = client(&url).fetch_leaderboard(|| async {}).await;
        assert_eq!(result.unwrap_err(), LeaderboardFailure::ParseError);
    }

    #[tokio::test]
    async fn test_exhausted_budget_is_wake_timeout() {
        let (url, hits) = spawn_flaky(ALWAYS_FAILING, sample_body()).await;

        let result = client(&url).fetch_leaderboard(|| async {}).await;

        assert_eq!(result.unwrap_err(), LeaderboardFailure::WakeTimeout);
        assert!(hits.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_ping_hits_endpoint_once() {
        let (url, hits) = spawn_flaky(ALWAYS_FAILING, sample_body()).await;
        client(&url).ping().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
