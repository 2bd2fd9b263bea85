//! Leaderboard embed builders for Discord responses
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateEmbed;

use crate::core::text::{plural, rank_medal};
use crate::features::leaderboard::LeaderboardRecord;

pub const BRAND_NAME: &str = "AcWoC";
pub const BRAND_URL: &str = "https://acwoc.androidclub.tech/";
pub const BRAND_COLOR: u32 = 0x6DA3AD;

/// Zero-width field used as a vertical spacer
const SPACER: &str = "\u{200b}";

fn spacer(embed: &mut CreateEmbed) {
    embed.field(SPACER, SPACER, false);
}

/// Branded embed: author, thumbnail, accent color and footer
pub fn basic_embed(avatar_url: &str, footer: &str) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.author(|a| {
        a.name(BRAND_NAME).url(BRAND_URL);
        if !avatar_url.is_empty() {
            a.icon_url(avatar_url);
        }
        a
    });
    if !avatar_url.is_empty() {
        embed.thumbnail(avatar_url);
    }
    embed.color(BRAND_COLOR);
    embed.footer(|f| f.text(footer));
    embed
}

/// Summary of the first three contributors
pub fn top_three_embed(records: &[LeaderboardRecord], avatar_url: &str, footer: &str) -> CreateEmbed {
    let mut embed = basic_embed(avatar_url, footer);
    embed.title("Top 3");

    for (idx, record) in records.iter().take(3).enumerate() {
        let rank = idx + 1;
        embed.field(
            format!("{} {}", rank_medal(rank), record.login),
            format!(
                "Score: `{}`\nStreak: `{}` day{}\nPRs: `{}`\n[View {}'s Profile]({})",
                record.score,
                record.streak,
                plural(record.streak),
                record.pr_urls.len(),
                record.login,
                record.url
            ),
            false,
        );
        spacer(&mut embed);
    }

    embed.field(
        SPACER,
        format!("[*View Full Leaderboard*]({BRAND_URL})"),
        false,
    );
    embed
}

/// Detailed card for one contributor at `rank`
pub fn profile_embed(
    rank: usize,
    record: &LeaderboardRecord,
    avatar_url: &str,
    footer: &str,
) -> CreateEmbed {
    let mut embed = basic_embed(avatar_url, footer);
    embed.title(format!("{} {}", rank_medal(rank), record.login).trim_start());
    embed.url(&record.url);

    embed.field("Rank", format!("**#{rank}**"), true);
    embed.field("Score", format!("`{}`", record.score), true);
    spacer(&mut embed);
    embed.field(
        "Streak",
        format!("`{}` Day{}", record.streak, plural(record.streak)),
        true,
    );
    embed.field("Total PRs", format!("`{}`", record.pr_urls.len()), true);
    spacer(&mut embed);
    embed.field("GitHub Profile", &record.url, false);

    embed.image(format!("{}&size=128", record.avatar_url));
    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record(login: &str, streak: u64) -> LeaderboardRecord {
        LeaderboardRecord {
            avatar_url: "https://avatars.githubusercontent.com/u/1?v=4".to_string(),
            login: login.to_string(),
            url: format!("https://github.com/{login}"),
            score: 42,
            pr_urls: vec!["https://github.com/a/b/pull/1".to_string()],
            pr_dates: vec!["2025-12-02".to_string()],
            streak,
        }
    }

    fn field_count(embed: &CreateEmbed) -> usize {
        embed
            .0
            .get("fields")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }

    #[test]
    fn test_basic_embed_without_avatar() {
        let embed = basic_embed("", "footer");
        assert!(embed.0.get("thumbnail").is_none());
        assert!(embed.0.get("footer").is_some());
    }

    #[test]
    fn test_top_three_embed_fields() {
        let records = vec![record("a", 1), record("b", 2), record("c", 3), record("d", 4)];
        let embed = top_three_embed(&records, "", "Updated now");

        assert_eq!(embed.0.get("title").and_then(Value::as_str), Some("Top 3"));
        // three rows, three spacers, one link
        assert_eq!(field_count(&embed), 7);
    }

    #[test]
    fn test_top_three_embed_short_board() {
        let embed = top_three_embed(&[record("solo", 1)], "", "Updated now");
        assert_eq!(field_count(&embed), 3);
    }

    #[test]
    fn test_profile_embed_title_and_image() {
        let embed = profile_embed(1, &record("octo", 2), "", "Updated now");

        assert_eq!(embed.0.get("title").and_then(Value::as_str), Some("🥇 octo"));
        assert_eq!(
            embed.0.get("url").and_then(Value::as_str),
            Some("https://github.com/octo")
        );
        assert_eq!(field_count(&embed), 7);
        let image = embed.0.get("image").and_then(|i| i.get("url")).and_then(Value::as_str);
        assert_eq!(
            image,
            Some("https://avatars.githubusercontent.com/u/1?v=4&size=128")
        );
    }

    #[test]
    fn test_profile_embed_no_medal_past_third() {
        let embed = profile_embed(7, &record("late", 0), "", "");
        assert_eq!(embed.0.get("title").and_then(Value::as_str), Some("late"));
    }
}
