//! Per-player statistics derived from the match list.
//!
//! Nothing here is stored: every figure is recomputed from the goal entries
//! by a linear scan over all matches.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Match, Player};

/// Number of players shown on the top scorers leaderboard.
pub const TOP_SCORERS_LIMIT: usize = 5;

/// Badge shown next to a player according to total goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ScorerTier {
    /// No goals yet
    Newcomer,
    /// At least one goal
    Active,
    /// More than 5 goals
    Scorer,
    /// More than 10 goals
    TopScorer,
}

impl ScorerTier {
    pub fn for_goals(total_goals: u32) -> Self {
        match total_goals {
            0 => ScorerTier::Newcomer,
            1..=5 => ScorerTier::Active,
            6..=10 => ScorerTier::Scorer,
            _ => ScorerTier::TopScorer,
        }
    }
}

/// Aggregated figures for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerStats {
    #[serde(flatten)]
    pub player: Player,
    pub total_goals: u32,
    /// Matches in which the player has at least one goal entry.
    /// This approximates attendance: a player who played without scoring
    /// is not counted.
    pub matches_played: u32,
    /// `total_goals / matches_played` with two decimals, "0.00" when no match
    pub avg_goals: String,
    pub tier: ScorerTier,
}

/// Average goals per match formatted with two decimals.
pub fn format_average(total_goals: u32, matches_played: u32) -> String {
    if matches_played == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", f64::from(total_goals) / f64::from(matches_played))
}

/// Compute stats for every player, in the order the players were given.
pub fn compute_stats(players: &[Player], matches: &[Match]) -> Vec<PlayerStats> {
    players
        .iter()
        .map(|player| {
            let mut total_goals: u32 = 0;
            let mut matches_played = 0;
            for m in matches {
                total_goals = total_goals.saturating_add(m.goals.goals_for_player(&player.id));
                if m.goals.involves(&player.id) {
                    matches_played += 1;
                }
            }

            PlayerStats {
                player: player.clone(),
                total_goals,
                matches_played,
                avg_goals: format_average(total_goals, matches_played),
                tier: ScorerTier::for_goals(total_goals),
            }
        })
        .collect()
}

/// Order by total goals, highest first. Ties keep their input order.
pub fn rank(mut stats: Vec<PlayerStats>) -> Vec<PlayerStats> {
    // `sort_by` is a stable sort.
    stats.sort_by(|a, b| b.total_goals.cmp(&a.total_goals));
    stats
}

/// The leaderboard: players with at least one goal, ranked, first five.
pub fn top_scorers(players: &[Player], matches: &[Match]) -> Vec<PlayerStats> {
    let scorers = compute_stats(players, matches)
        .into_iter()
        .filter(|s| s.total_goals > 0)
        .collect();
    let mut ranked = rank(scorers);
    ranked.truncate(TOP_SCORERS_LIMIT);
    ranked
}
