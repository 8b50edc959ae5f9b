use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// One logged event from the `poop_tracker` table.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub user_id: String,
    pub username: String,
    pub timestamp: NaiveDateTime,
}

/// One row of the yearly aggregate, labelled with the user's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCount {
    pub username: String,
    pub count: i64,
}

/// Per-user statistics blob produced by the tracker bot. Field names mirror
/// the JSON keys it writes.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalStats {
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "TotalPoops")]
    pub total_poops: i64,
    #[serde(rename = "MaxStreak")]
    pub max_streak: i64,
    #[serde(rename = "MostPoopsCount")]
    pub most_poops_count: i64,
    #[serde(rename = "DayWithMostPoops")]
    pub day_with_most_poops: NaiveDate,
    #[serde(rename = "GroupRank")]
    pub group_rank: Option<GroupRank>,
}

/// Optional comparison of one user's total against the rest of the group.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRank {
    #[serde(rename = "Rank")]
    pub rank: i64,
    #[serde(rename = "TotalUsers")]
    pub total_users: i64,
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

/// Reads and validates a statistics blob. Any missing required key fails
/// here, before any slide is rendered, with the offending field named.
pub fn load_stats(path: &Path) -> anyhow::Result<PersonalStats> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stats file {}", path.display()))?;
    let stats: PersonalStats = serde_json::from_str(&raw)
        .with_context(|| format!("invalid stats file {}", path.display()))?;
    Ok(stats)
}
