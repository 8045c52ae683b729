// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal attribution bookkeeping.
//!
//! Goals are aggregated per (side, player): a player scoring again for the
//! same side increments the existing entry instead of appending a new one.
//! An entry never holds zero goals; it is removed when its count drops to 0.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Player;

/// One of the two competing teams in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Why a goal count could not be credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GoalCountError {
    #[error("a goal entry needs at least one goal")]
    Zero,
    #[error("goal count does not fit in the side total")]
    Overflow,
}

/// Aggregated goal count for one player on one side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalEntry {
    pub player_id: String,
    /// Player name at the time of the first goal
    pub player_name: String,
    /// Team name of the side the goals were scored for
    pub team: String,
    /// Always >= 1
    pub nb_goals: u32,
}

/// Goal entries of a match, keyed by side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchGoals {
    team_a: Vec<GoalEntry>,
    team_b: Vec<GoalEntry>,
}

impl MatchGoals {
    /// Entries for one side, in first-scored order.
    pub fn entries(&self, side: Side) -> &[GoalEntry] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    fn entries_mut(&mut self, side: Side) -> &mut Vec<GoalEntry> {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    /// All entries of both sides, side A first.
    pub fn iter(&self) -> impl Iterator<Item = &GoalEntry> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.team_a.is_empty() && self.team_b.is_empty()
    }

    /// Sum of goals on one side.
    ///
    /// [`add`](Self::add) keeps every side's sum within `u32`, so this never
    /// saturates for goals built through it.
    pub fn total(&self, side: Side) -> u32 {
        self.checked_total(side).unwrap_or(u32::MAX)
    }

    fn checked_total(&self, side: Side) -> Option<u32> {
        self.entries(side)
            .iter()
            .try_fold(0u32, |acc, e| acc.checked_add(e.nb_goals))
    }

    /// Goals credited to a player across both sides.
    pub fn goals_for_player(&self, player_id: &str) -> u32 {
        self.iter()
            .filter(|e| e.player_id == player_id)
            .fold(0u32, |acc, e| acc.saturating_add(e.nb_goals))
    }

    /// Whether the player has an entry on either side.
    pub fn involves(&self, player_id: &str) -> bool {
        self.iter().any(|e| e.player_id == player_id)
    }

    /// Credit `nb_goals` to a player on one side, creating the entry on the
    /// first goal. On error the goals are left untouched.
    pub fn add(
        &mut self,
        side: Side,
        team: &str,
        player: &Player,
        nb_goals: u32,
    ) -> Result<&GoalEntry, GoalCountError> {
        if nb_goals == 0 {
            return Err(GoalCountError::Zero);
        }
        // The side total bounds every entry on that side.
        self.checked_total(side)
            .and_then(|total| total.checked_add(nb_goals))
            .ok_or(GoalCountError::Overflow)?;

        let entries = self.entries_mut(side);
        let index = match entries.iter().position(|e| e.player_id == player.id) {
            Some(index) => {
                entries[index].nb_goals += nb_goals;
                index
            }
            None => {
                entries.push(GoalEntry {
                    player_id: player.id.clone(),
                    player_name: player.name.clone(),
                    team: team.to_string(),
                    nb_goals,
                });
                entries.len() - 1
            }
        };
        Ok(&entries[index])
    }

    /// Take back exactly one goal from a player's entry on one side.
    ///
    /// Returns the remaining count, or `None` if there was no entry.
    pub fn remove_one(&mut self, side: Side, player_id: &str) -> Option<u32> {
        let entries = self.entries_mut(side);
        let index = entries
            .iter()
            .position(|e| e.player_id == player_id && e.nb_goals > 0)?;

        entries[index].nb_goals -= 1;
        let remaining = entries[index].nb_goals;
        if remaining == 0 {
            entries.remove(index);
        }
        Some(remaining)
    }
}
