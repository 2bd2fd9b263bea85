//! Small string helpers shared by command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Characters Discord wraps around a channel mention (`<#123>`)
const CHANNEL_MENTION_CHARS: &[char] = &[' ', '<', '>', '#'];

/// Medal shown next to the top three ranks; empty for everyone else
pub fn rank_medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "",
    }
}

/// Recover a raw channel ID from a mention such as `<#123456>`
///
/// Bare IDs pass through unchanged.
pub fn parse_channel_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !CHANNEL_MENTION_CHARS.contains(c))
        .collect()
}

/// "s" when `count` is plural
pub fn plural(count: u64) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

/// Standard error body used by every command reply
pub fn error_message(detail: &str) -> String {
    format!("## **`ERROR`**\n{detail}")
}
