//! # Feature: Health Check
//!
//! Single-route HTTP server for uptime probes. Each probe may also nudge the
//! leaderboard backend so it does not fall asleep, throttled to one nudge per
//! window.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use anyhow::Result;
use axum::extract::State;
use axum::routing::get;
use axum::Router;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::features::leaderboard::LeaderboardClient;

/// Minimum gap between two keep-alive pings
pub const REPING_INTERVAL: Duration = Duration::from_secs(15 * 60);

const HEALTH_BODY: &str = "hello world";

/// Allows at most one action per `interval`
pub struct PingThrottle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl PingThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Claim the slot at `now` if the window since the last claim has elapsed
    pub async fn try_acquire(&self, now: Instant) -> bool {
        let mut last = self.last.lock().await;
        match *last {
            Some(previous) if now.saturating_duration_since(previous) < self.interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

#[derive(Clone)]
pub struct HealthState {
    leaderboard: LeaderboardClient,
    throttle: Arc<PingThrottle>,
}

impl HealthState {
    pub fn new(leaderboard: LeaderboardClient) -> Self {
        Self::with_interval(leaderboard, REPING_INTERVAL)
    }

    pub fn with_interval(leaderboard: LeaderboardClient, interval: Duration) -> Self {
        Self {
            leaderboard,
            throttle: Arc::new(PingThrottle::new(interval)),
        }
    }
}

async fn health(State(state): State<HealthState>) -> &'static str {
    if state.throttle.try_acquire(Instant::now()).await {
        debug!("Health probe: re-pinging leaderboard backend");
        let leaderboard = state.leaderboard.clone();
        tokio::spawn(async move {
            leaderboard.ping().await;
        });
    }
    HEALTH_BODY
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/", get(health)).with_state(state)
}

/// Bind `0.0.0.0:port` and serve until the process exits
pub async fn serve(port: u16, state: HealthState) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("🌐 Health server running on port {port}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
