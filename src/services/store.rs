// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application state store.
//!
//! Holds the local copies of players and matches and exposes the actions
//! the presentation layer calls. Every remote action follows the same path:
//! 1. Validate the command (nothing is sent when validation fails)
//! 2. Resolve ids against the local collections
//! 3. Call the backend
//! 4. Re-fetch the whole collection and replace local state
//!
//! A failed call or failed re-fetch returns the error and keeps the previous
//! local state. Concurrent stores sharing one backend are not coordinated;
//! the last re-fetch wins.

use crate::error::{AppError, Result};
use crate::models::stats::{self, PlayerStats};
use crate::models::{
    AddGoalCommand, CreateMatchCommand, CreatePlayerCommand, GoalEntry, Match, Player,
    RemoveGoalQuery,
};
use crate::services::SportsBackend;
use crate::time_utils::TimestampIds;
use validator::Validate;

/// Store of players and matches backed by a [`SportsBackend`].
pub struct SportsStore<B> {
    backend: B,
    ids: TimestampIds,
    players: Vec<Player>,
    matches: Vec<Match>,
}

impl<B: SportsBackend> SportsStore<B> {
    /// Create an empty store. Call [`load`](Self::load) to fetch initial state.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ids: TimestampIds::new(),
            players: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn find_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Fetch both collections.
    pub async fn load(&mut self) -> Result<()> {
        self.fetch_players().await?;
        self.fetch_matches().await
    }

    pub async fn fetch_players(&mut self) -> Result<()> {
        let players = self.backend.list_players().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch players; keeping previous state");
        })?;
        tracing::debug!(count = players.len(), "Players refreshed");
        self.players = players;
        Ok(())
    }

    pub async fn fetch_matches(&mut self) -> Result<()> {
        let matches = self.backend.list_matches().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch matches; keeping previous state");
        })?;
        tracing::debug!(count = matches.len(), "Matches refreshed");
        self.matches = matches;
        Ok(())
    }

    /// Register a player under a fresh timestamp id.
    pub async fn add_player(&mut self, name: &str) -> Result<Player> {
        let command = CreatePlayerCommand {
            id: self.ids.next_id(),
            name: name.to_string(),
        };
        command.validate()?;

        let created = self.backend.create_player(&command).await?;
        self.fetch_players().await?;
        Ok(created)
    }

    pub async fn add_match(&mut self, command: CreateMatchCommand) -> Result<Match> {
        command.validate()?;

        let created = self.backend.create_match(&command).await?;
        self.fetch_matches().await?;
        Ok(created)
    }

    /// Credit `nb_goals` goals to a player for the side named `team`.
    pub async fn add_goal(
        &mut self,
        match_id: &str,
        player_id: &str,
        team: &str,
        nb_goals: u32,
    ) -> Result<()> {
        let command = goal_command(player_id, team, nb_goals)?;

        self.require_match(match_id)?.goal_side(team)?;
        let player = self.require_player(player_id)?;
        let command = AddGoalCommand {
            player_name: player.name.clone(),
            ..command
        };

        self.backend.add_goal(match_id, &command).await?;
        self.fetch_matches().await
    }

    /// Take back one goal from a player on the side named `team`.
    pub async fn remove_goal(&mut self, match_id: &str, team: &str, player_id: &str) -> Result<()> {
        validate_removal(team, player_id)?;
        self.require_match(match_id)?.goal_side(team)?;

        self.backend.remove_goal(match_id, team, player_id).await?;
        self.fetch_matches().await
    }

    pub async fn complete_match(&mut self, match_id: &str) -> Result<()> {
        self.require_match(match_id)?;

        self.backend.complete_match(match_id).await?;
        self.fetch_matches().await
    }

    // ─── Local Variants ──────────────────────────────────────────

    /// Apply an add-goal to the local copy only, without the backend.
    pub fn add_goal_local(
        &mut self,
        match_id: &str,
        player_id: &str,
        team: &str,
        nb_goals: u32,
    ) -> Result<&GoalEntry> {
        goal_command(player_id, team, nb_goals)?;
        let player = self.require_player(player_id)?.clone();
        let m = self.require_match_mut(match_id)?;
        m.add_goal(&player, team, nb_goals)
    }

    /// Apply a remove-goal to the local copy only, without the backend.
    ///
    /// Returns `false` when the player had no entry on that side.
    pub fn remove_goal_local(&mut self, match_id: &str, team: &str, player_id: &str) -> Result<bool> {
        validate_removal(team, player_id)?;
        self.require_match_mut(match_id)?.remove_goal(team, player_id)
    }

    // ─── Derived Views ───────────────────────────────────────────

    /// Every player's stats, ranked by total goals.
    pub fn player_stats(&self) -> Vec<PlayerStats> {
        stats::rank(stats::compute_stats(&self.players, &self.matches))
    }

    pub fn top_scorers(&self) -> Vec<PlayerStats> {
        stats::top_scorers(&self.players, &self.matches)
    }

    fn require_match(&self, match_id: &str) -> Result<&Match> {
        self.find_match(match_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))
    }

    fn require_match_mut(&mut self, match_id: &str) -> Result<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))
    }

    fn require_player(&self, player_id: &str) -> Result<&Player> {
        self.find_player(player_id)
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))
    }
}

/// Build and validate the add-goal command shared by the remote and local
/// variants. The player name is filled in once the player is resolved.
fn goal_command(player_id: &str, team: &str, nb_goals: u32) -> Result<AddGoalCommand> {
    let command = AddGoalCommand {
        player_id: player_id.to_string(),
        player_name: String::new(),
        team: team.to_string(),
        nb_goals,
    };
    command.validate()?;
    Ok(command)
}

fn validate_removal(team: &str, player_id: &str) -> Result<()> {
    RemoveGoalQuery {
        team: team.to_string(),
    }
    .validate()?;
    if player_id.trim().is_empty() {
        return Err(AppError::BadRequest("Player id is required".to_string()));
    }
    Ok(())
}
