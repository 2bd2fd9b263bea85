//! # Wake-and-fetch
//!
//! Polls an HTTP endpoint that may be cold-starting until it answers or the
//! wait budget runs out. The first transient failure fires a one-shot wake
//! callback so the caller can warn the user the answer will be slow.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::{debug, info, warn};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOptions {
    /// Bound on a single attempt, body included
    pub request_timeout: Duration,
    pub retry_delay: Duration,
    /// Bound on the whole polling loop
    pub max_wait: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(5_000),
            retry_delay: Duration::from_millis(500),
            max_wait: Duration::from_millis(60_000),
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("MAX_WAIT_EXCEEDED")]
    MaxWaitExceeded,

    /// The request itself is malformed (bad URL, bad header)
    #[error("request could not be built: {0}")]
    Request(#[source] reqwest::Error),

    /// The endpoint answered 2xx but the body is not JSON
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

enum AttemptError {
    /// Worth retrying: bad status, timeout, connect or transport failure
    Transient(String),
    Fatal(FetchError),
}

fn classify(err: reqwest::Error) -> AttemptError {
    if err.is_builder() {
        AttemptError::Fatal(FetchError::Request(err))
    } else if err.is_decode() {
        AttemptError::Fatal(FetchError::Decode(err))
    } else if err.is_timeout() {
        AttemptError::Transient("request timed out".to_string())
    } else {
        AttemptError::Transient(err.to_string())
    }
}

async fn attempt(
    client: &reqwest::Client,
    url: &str,
    request_timeout: Duration,
) -> Result<Value, AttemptError> {
    let response = client
        .get(url)
        .timeout(request_timeout)
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AttemptError::Transient(format!("HTTP {status}")));
    }

    response.json::<Value>().await.map_err(classify)
}

/// GET `url` until it succeeds, returning the parsed JSON body
///
/// `on_waking` runs at most once per call, on the first transient failure.
/// Non-transient errors are returned immediately without retrying.
pub async fn wake_and_fetch<F, Fut>(
    client: &reqwest::Client,
    url: &str,
    on_waking: F,
    options: RetryOptions,
) -> Result<Value, FetchError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut on_waking = Some(on_waking);

    let polling = async {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match attempt(client, url, options.request_timeout).await {
                Ok(body) => {
                    debug!("Fetched {url} after {attempts} attempt(s)");
                    return Ok(body);
                }
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Transient(reason)) => {
                    debug!("Attempt {attempts} against {url} failed: {reason}");
                    if let Some(wake) = on_waking.take() {
                        info!("⏳ {url} looks asleep, waiting for it to wake up");
                        wake().await;
                    }
                }
            }
            sleep(options.retry_delay).await;
        }
    };

    match timeout(options.max_wait, polling).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "Gave up on {url} after {}ms",
                options.max_wait.as_millis()
            );
            Err(FetchError::MaxWaitExceeded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        spawn_flaky, spawn_plain_text, unreachable_url, ALWAYS_FAILING,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast_options() -> RetryOptions {
        RetryOptions {
            request_timeout: Duration::from_millis(200),
            retry_delay: Duration::from_millis(10),
            max_wait: Duration::from_millis(400),
        }
    }

    fn wake_counter() -> (Arc<AtomicUsize>, impl FnOnce() -> std::future::Ready<()>) {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let callback = move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        };
        (wakes, callback)
    }

    #[test]
    fn test_default_options() {
        let options = RetryOptions::default();
        assert_eq!(options.request_timeout, Duration::from_secs(5));
        assert_eq!(options.retry_delay, Duration::from_millis(500));
        assert_eq!(options.max_wait, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_first_attempt_success_never_wakes() {
        let (url, hits) = spawn_flaky(0, json!({ "ok": true })).await;
        let (wakes, on_waking) = wake_counter();

        let body = wake_and_fetch(&reqwest::Client::new(), &url, on_waking, fast_options())
            .await
            .unwrap();

        assert_eq!(body, json!({ "ok": true }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fails_once_then_succeeds() {
        let (url, hits) = spawn_flaky(1, json!({ "ok": true })).await;
        let (wakes, on_waking) = wake_counter();

        let body = wake_and_fetch(&reqwest::Client::new(), &url, on_waking, fast_options())
            .await
            .unwrap();

        assert_eq!(body["ok"], json!(true));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wakes_once_across_many_failures() {
        let (url, hits) = spawn_flaky(3, json!([])).await;
        let (wakes, on_waking) = wake_counter();

        wake_and_fetch(&reqwest::Client::new(), &url, on_waking, fast_options())
            .await
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 4);
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_always_failing_exceeds_max_wait() {
        let (url, hits) = spawn_flaky(ALWAYS_FAILING, json!(null)).await;
        let (wakes, on_waking) = wake_counter();

        let err = wake_and_fetch(&reqwest::Client::new(), &url, on_waking, fast_options())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::MaxWaitExceeded));
        assert!(hits.load(Ordering::SeqCst) > 1);
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_is_retried() {
        let url = unreachable_url().await;
        let (wakes, on_waking) = wake_counter();

        let err = wake_and_fetch(&reqwest::Client::new(), &url, on_waking, fast_options())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::MaxWaitExceeded));
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_retried() {
        let (wakes, on_waking) = wake_counter();

        let err = wake_and_fetch(
            &reqwest::Client::new(),
            "not a url",
            on_waking,
            fast_options(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_json_body_is_not_retried() {
        let url = spawn_plain_text().await;
        let (wakes, on_waking) = wake_counter();

        let err = wake_and_fetch(&reqwest::Client::new(), &url, on_waking, fast_options())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_async_wake_callback_is_awaited() {
        let (url, _) = spawn_flaky(1, json!({})).await;
        let notice = Arc::new(tokio::sync::Mutex::new(String::new()));
        let target = notice.clone();

        wake_and_fetch(
            &reqwest::Client::new(),
            &url,
            move || async move {
                target.lock().await.push_str("please be patient");
            },
            fast_options(),
        )
        .await
        .unwrap();

        assert_eq!(*notice.lock().await, "please be patient");
    }
}
