//! Leaderboard response schema
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every profile and contribution URL must live under this prefix
pub const TRUSTED_URL_PREFIX: &str = "https://github.com/";

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("leaderboard body does not match schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("untrusted url for {login}: {url}")]
    UntrustedUrl { login: String, url: String },
}

/// One contributor row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub avatar_url: String,
    pub login: String,
    pub url: String,
    pub score: u64,
    pub pr_urls: Vec<String>,
    /// Parallel to `pr_urls`
    pub pr_dates: Vec<String>,
    pub streak: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub login: String,
    pub streak: u64,
}

/// One immutable fetch result; rank is position + 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
    pub leaderboard: Vec<LeaderboardRecord>,
    pub success: bool,
    pub updated_at: i64,
    pub generated: bool,
    pub updated_timestring: String,
    pub streak_data: Vec<StreakRecord>,
}

impl LeaderboardSnapshot {
    /// Decode and validate a raw JSON body
    pub fn from_value(body: serde_json::Value) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_value(body)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for record in &self.leaderboard {
            let urls = std::iter::once(&record.url).chain(record.pr_urls.iter());
            for url in urls {
                if !url.starts_with(TRUSTED_URL_PREFIX) {
                    return Err(SnapshotError::UntrustedUrl {
                        login: record.login.clone(),
                        url: url.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.leaderboard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaderboard.is_empty()
    }

    /// Record at a 1-based rank
    pub fn at_rank(&self, rank: usize) -> Option<&LeaderboardRecord> {
        rank.checked_sub(1).and_then(|idx| self.leaderboard.get(idx))
    }

    /// Case-insensitive login lookup, returning the 1-based rank
    pub fn find_contributor(&self, login: &str) -> Option<(usize, &LeaderboardRecord)> {
        let wanted = login.to_lowercase();
        self.leaderboard
            .iter()
            .enumerate()
            .find(|(_, record)| record.login.to_lowercase() == wanted)
            .map(|(idx, record)| (idx + 1, record))
    }

    /// First `n` records (fewer if the board is shorter)
    pub fn top(&self, n: usize) -> &[LeaderboardRecord] {
        &self.leaderboard[..n.min(self.leaderboard.len())]
    }
}
