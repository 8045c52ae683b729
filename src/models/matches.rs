// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match model: two named sides, a date, goal attributions and a derived score.
//!
//! The score is never stored. It is summed from the goal entries whenever it
//! is read or serialized, so it cannot drift from the goals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::commands::CreateMatchCommand;
use crate::models::goals::{GoalCountError, GoalEntry, MatchGoals, Side};
use crate::models::Player;
use crate::time_utils::calendar_date;

/// Goals per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Score {
    pub goals_team_a: u32,
    pub goals_team_b: u32,
}

/// A recorded contest between two named teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatchRecord", into = "MatchRecord")]
pub struct Match {
    pub id: String,
    pub date: NaiveDate,
    pub team_a: String,
    pub team_b: String,
    pub goals: MatchGoals,
    pub is_completed: bool,
}

impl Match {
    /// Create a fresh match with no goals.
    pub fn new(id: impl Into<String>, command: &CreateMatchCommand) -> Self {
        Self {
            id: id.into(),
            date: command.date,
            team_a: command.team_a.clone(),
            team_b: command.team_b.clone(),
            goals: MatchGoals::default(),
            is_completed: command.is_completed,
        }
    }

    /// Resolve a team name to its side by exact string equality.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if team == self.team_a {
            Some(Side::A)
        } else if team == self.team_b {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Current score, summed from the goal entries.
    pub fn score(&self) -> Score {
        Score {
            goals_team_a: self.goals.total(Side::A),
            goals_team_b: self.goals.total(Side::B),
        }
    }

    /// Side whose goals may be changed for `team`.
    ///
    /// Fails when the match is completed or `team` names neither side.
    pub fn goal_side(&self, team: &str) -> Result<Side> {
        if self.is_completed {
            return Err(AppError::Conflict(format!(
                "Match {} is completed; goals can no longer change",
                self.id
            )));
        }
        self.side_of(team).ok_or_else(|| AppError::UnknownTeam {
            match_id: self.id.clone(),
            team: team.to_string(),
        })
    }

    /// Credit `nb_goals` goals to `player` for the side named `team`.
    ///
    /// Nothing changes when the match is completed, `team` names neither
    /// side, or the count is zero or would overflow the side's total.
    pub fn add_goal(&mut self, player: &Player, team: &str, nb_goals: u32) -> Result<&GoalEntry> {
        let side = self.goal_side(team)?;
        let team_name = self.team_name(side).to_string();
        let match_id = self.id.clone();

        self.goals
            .add(side, &team_name, player, nb_goals)
            .map_err(|e| {
                AppError::BadRequest(format!(
                    "Cannot credit {} goals to {} in match {}: {}",
                    nb_goals, team_name, match_id, e
                ))
            })
    }

    /// Take back one goal from `player_id` on the side named `team`.
    ///
    /// Returns `false` (and leaves the match untouched) when the player has
    /// no entry on that side.
    pub fn remove_goal(&mut self, team: &str, player_id: &str) -> Result<bool> {
        let side = self.goal_side(team)?;
        Ok(self.goals.remove_one(side, player_id).is_some())
    }

    /// Mark the match as completed. Returns `false` if it already was.
    pub fn complete(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        true
    }
}

/// Match as exchanged with the sports API.
///
/// Goals are keyed by team name and the score is carried alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/", rename = "Match")
)]
pub struct MatchRecord {
    #[serde(default)]
    pub id: String,
    #[serde(with = "calendar_date")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub team_a: String,
    pub team_b: String,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub goals: BTreeMap<String, Vec<GoalEntry>>,
    #[serde(default)]
    pub is_completed: bool,
}

impl From<Match> for MatchRecord {
    fn from(m: Match) -> Self {
        let score = m.score();
        let mut goals = BTreeMap::new();
        for side in [Side::A, Side::B] {
            let entries = m.goals.entries(side);
            if !entries.is_empty() {
                goals.insert(m.team_name(side).to_string(), entries.to_vec());
            }
        }

        Self {
            id: m.id,
            date: m.date,
            team_a: m.team_a,
            team_b: m.team_b,
            score,
            goals,
            is_completed: m.is_completed,
        }
    }
}

impl TryFrom<MatchRecord> for Match {
    type Error = String;

    fn try_from(record: MatchRecord) -> std::result::Result<Self, Self::Error> {
        if record.team_a == record.team_b {
            return Err(format!(
                "match {} has the same team on both sides: {:?}",
                record.id, record.team_a
            ));
        }

        let mut m = Match {
            id: record.id,
            date: record.date,
            team_a: record.team_a,
            team_b: record.team_b,
            goals: MatchGoals::default(),
            is_completed: record.is_completed,
        };

        for (team, entries) in record.goals {
            let side = m.side_of(&team).ok_or_else(|| {
                format!(
                    "match {} has goals recorded for unknown team {:?}",
                    m.id, team
                )
            })?;
            for entry in entries {
                let player = Player::new(entry.player_id, entry.player_name);
                // Zero-goal entries are dropped and duplicates merged.
                let added = m.goals.add(side, &team, &player, entry.nb_goals).map(|_| ());
                match added {
                    Ok(()) | Err(GoalCountError::Zero) => {}
                    Err(e @ GoalCountError::Overflow) => {
                        return Err(format!(
                            "match {} has too many goals for team {:?}: {}",
                            m.id, team, e
                        ));
                    }
                }
            }
        }

        if m.score() != record.score {
            tracing::warn!(
                match_id = %m.id,
                reported = ?record.score,
                derived = ?m.score(),
                "Reported score disagrees with goal entries; using goal entries"
            );
        }

        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reds_vs_blues() -> Match {
        let command = CreateMatchCommand {
            date: NaiveDate::from_ymd_opt(2025, 5, 17).unwrap(),
            team_a: "Reds".to_string(),
            team_b: "Blues".to_string(),
            is_completed: false,
        };
        Match::new("m1", &command)
    }

    fn p1() -> Player {
        Player::new("p1", "Alice")
    }

    #[test]
    fn test_add_remove_scenario() {
        let mut m = reds_vs_blues();

        m.add_goal(&p1(), "Reds", 1).unwrap();
        m.add_goal(&p1(), "Reds", 1).unwrap();
        assert_eq!(m.goals.entries(Side::A)[0].nb_goals, 2);
        assert_eq!(m.score().goals_team_a, 2);

        assert!(m.remove_goal("Reds", "p1").unwrap());
        assert_eq!(m.goals.entries(Side::A)[0].nb_goals, 1);
        assert_eq!(m.score().goals_team_a, 1);

        assert!(m.remove_goal("Reds", "p1").unwrap());
        assert!(m.goals.entries(Side::A).is_empty());
        assert_eq!(m.score().goals_team_a, 0);
    }

    #[test]
    fn test_score_tracks_sum_of_increments() {
        let mut m = reds_vs_blues();
        let bob = Player::new("p2", "Bob");

        for n in [1, 3, 2] {
            m.add_goal(&p1(), "Reds", n).unwrap();
        }
        m.add_goal(&bob, "Reds", 4).unwrap();
        m.add_goal(&bob, "Blues", 1).unwrap();

        assert_eq!(m.goals.entries(Side::A)[0].nb_goals, 6);
        assert_eq!(
            m.score(),
            Score {
                goals_team_a: 10,
                goals_team_b: 1
            }
        );
    }

    #[test]
    fn test_remove_restores_previous_state() {
        let mut m = reds_vs_blues();
        m.add_goal(&p1(), "Blues", 2).unwrap();
        let before = m.clone();

        m.add_goal(&Player::new("p2", "Bob"), "Reds", 1).unwrap();
        m.remove_goal("Reds", "p2").unwrap();

        assert_eq!(m, before);
    }

    #[test]
    fn test_remove_without_entry_is_noop() {
        let mut m = reds_vs_blues();
        m.add_goal(&p1(), "Reds", 1).unwrap();
        let before = m.clone();

        assert!(!m.remove_goal("Blues", "p1").unwrap());
        assert!(!m.remove_goal("Reds", "nobody").unwrap());
        assert_eq!(m, before);
    }

    #[test]
    fn test_unknown_team_is_rejected_without_change() {
        let mut m = reds_vs_blues();
        let before = m.clone();

        let err = m.add_goal(&p1(), "Redz", 1).unwrap_err();
        assert!(matches!(err, AppError::UnknownTeam { ref team, .. } if team == "Redz"));
        assert_eq!(m, before);

        let err = m.remove_goal("Greens", "p1").unwrap_err();
        assert!(matches!(err, AppError::UnknownTeam { .. }));
    }

    #[test]
    fn test_completed_match_rejects_goal_changes() {
        let mut m = reds_vs_blues();
        m.add_goal(&p1(), "Reds", 1).unwrap();
        assert!(m.complete());
        assert!(!m.complete());

        assert!(matches!(
            m.add_goal(&p1(), "Reds", 1),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            m.remove_goal("Reds", "p1"),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(m.score().goals_team_a, 1);
    }

    #[test]
    fn test_zero_goals_rejected() {
        let mut m = reds_vs_blues();
        assert!(matches!(
            m.add_goal(&p1(), "Reds", 0),
            Err(AppError::BadRequest(_))
        ));
        assert!(m.goals.is_empty());
    }

    #[test]
    fn test_goal_count_overflow_rejected() {
        let mut m = reds_vs_blues();
        m.add_goal(&p1(), "Reds", u32::MAX).unwrap();
        let before = m.clone();

        assert!(matches!(
            m.add_goal(&p1(), "Reds", 1),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            m.add_goal(&Player::new("p2", "Bob"), "Reds", 1),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(m, before);
        assert_eq!(m.score().goals_team_a, u32::MAX);
    }

    #[test]
    fn test_wire_format_carries_derived_score() {
        let mut m = reds_vs_blues();
        m.add_goal(&p1(), "Blues", 2).unwrap();

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "m1",
                "date": "2025-05-17",
                "teamA": "Reds",
                "teamB": "Blues",
                "score": { "goalsTeamA": 0, "goalsTeamB": 2 },
                "goals": {
                    "Blues": [
                        { "playerId": "p1", "playerName": "Alice", "team": "Blues", "nbGoals": 2 }
                    ]
                },
                "isCompleted": false
            })
        );
    }

    #[test]
    fn test_decode_recomputes_score_and_merges_entries() {
        let value = json!({
            "id": "m9",
            "date": [2025, 5, 17],
            "teamA": "Reds",
            "teamB": "Blues",
            "score": { "goalsTeamA": 7, "goalsTeamB": 0 },
            "goals": {
                "Reds": [
                    { "playerId": "p1", "playerName": "Alice", "team": "Reds", "nbGoals": 1 },
                    { "playerId": "p1", "playerName": "Alice", "team": "Reds", "nbGoals": 2 },
                    { "playerId": "p2", "playerName": "Bob", "team": "Reds", "nbGoals": 0 }
                ]
            },
            "isCompleted": true
        });

        let m: Match = serde_json::from_value(value).unwrap();
        assert_eq!(m.goals.entries(Side::A).len(), 1);
        assert_eq!(m.score().goals_team_a, 3);
        assert!(m.is_completed);
    }

    #[test]
    fn test_decode_rejects_goals_for_unknown_team() {
        let value = json!({
            "id": "m9",
            "date": "2025-05-17",
            "teamA": "Reds",
            "teamB": "Blues",
            "goals": {
                "Redz": [
                    { "playerId": "p1", "playerName": "Alice", "team": "Redz", "nbGoals": 1 }
                ]
            }
        });

        let err = serde_json::from_value::<Match>(value).unwrap_err();
        assert!(err.to_string().contains("unknown team"));
    }

    #[test]
    fn test_decode_rejects_overflowing_goal_counts() {
        let value = json!({
            "id": "m9",
            "date": "2025-05-17",
            "teamA": "Reds",
            "teamB": "Blues",
            "goals": {
                "Reds": [
                    { "playerId": "p1", "playerName": "Alice", "team": "Reds", "nbGoals": 4294967295u32 },
                    { "playerId": "p1", "playerName": "Alice", "team": "Reds", "nbGoals": 1 }
                ]
            }
        });

        let err = serde_json::from_value::<Match>(value).unwrap_err();
        assert!(err.to_string().contains("too many goals"));
    }
}
