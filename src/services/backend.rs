// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The seam between the store and wherever the authoritative data lives.

use std::future::Future;

use crate::db::MemoryDb;
use crate::error::Result;
use crate::models::{AddGoalCommand, CreateMatchCommand, CreatePlayerCommand, Match, Player};

/// Operations the store needs from its data source.
///
/// Implemented over HTTP by [`ApiClient`](crate::services::ApiClient) and
/// locally by [`MemoryDb`].
pub trait SportsBackend: Send + Sync {
    fn list_players(&self) -> impl Future<Output = Result<Vec<Player>>> + Send;

    fn create_player(
        &self,
        command: &CreatePlayerCommand,
    ) -> impl Future<Output = Result<Player>> + Send;

    fn list_matches(&self) -> impl Future<Output = Result<Vec<Match>>> + Send;

    fn create_match(
        &self,
        command: &CreateMatchCommand,
    ) -> impl Future<Output = Result<Match>> + Send;

    fn add_goal(
        &self,
        match_id: &str,
        command: &AddGoalCommand,
    ) -> impl Future<Output = Result<Match>> + Send;

    fn remove_goal(
        &self,
        match_id: &str,
        team: &str,
        player_id: &str,
    ) -> impl Future<Output = Result<Match>> + Send;

    fn complete_match(&self, match_id: &str) -> impl Future<Output = Result<Match>> + Send;
}

impl SportsBackend for MemoryDb {
    async fn list_players(&self) -> Result<Vec<Player>> {
        MemoryDb::list_players(self).await
    }

    async fn create_player(&self, command: &CreatePlayerCommand) -> Result<Player> {
        self.insert_player(command).await
    }

    async fn list_matches(&self) -> Result<Vec<Match>> {
        MemoryDb::list_matches(self).await
    }

    async fn create_match(&self, command: &CreateMatchCommand) -> Result<Match> {
        self.insert_match(command).await
    }

    async fn add_goal(&self, match_id: &str, command: &AddGoalCommand) -> Result<Match> {
        MemoryDb::add_goal(self, match_id, command).await
    }

    async fn remove_goal(&self, match_id: &str, team: &str, player_id: &str) -> Result<Match> {
        MemoryDb::remove_goal(self, match_id, team, player_id).await
    }

    async fn complete_match(&self, match_id: &str) -> Result<Match> {
        MemoryDb::complete_match(self, match_id).await
    }
}
