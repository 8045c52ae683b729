// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store of players and matches with typed operations.
//!
//! Provides high-level operations for:
//! - Players (registration and listing)
//! - Matches (creation, goal bookkeeping, completion)
//!
//! When opened on a data directory, every collection is mirrored to a single
//! JSON file holding the whole array, rewritten on each change. A change is
//! applied in memory only after its snapshot has been written.

use crate::db::collections;
use crate::error::{AppError, Result};
use crate::models::{AddGoalCommand, CreateMatchCommand, CreatePlayerCommand, Match, Player};
use crate::time_utils::TimestampIds;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    players: Vec<Player>,
    matches: Vec<Match>,
}

/// In-memory database client. Clones share the same collections.
#[derive(Clone)]
pub struct MemoryDb {
    inner: Arc<RwLock<Collections>>,
    ids: Arc<TimestampIds>,
    snapshot_dir: Option<PathBuf>,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDb {
    /// Create an empty database that lives only in memory.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections::default())),
            ids: Arc::new(TimestampIds::new()),
            snapshot_dir: None,
        }
    }

    /// Open a database backed by JSON snapshots in `dir`.
    ///
    /// The directory is created if needed. Missing snapshot files are
    /// treated as empty collections.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let players: Vec<Player> = load_collection(&dir, collections::PLAYERS).await?;
        let matches: Vec<Match> = load_collection(&dir, collections::MATCHES).await?;

        tracing::info!(
            dir = %dir.display(),
            players = players.len(),
            matches = matches.len(),
            "Loaded collection snapshots"
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(Collections { players, matches })),
            ids: Arc::new(TimestampIds::new()),
            snapshot_dir: Some(dir),
        })
    }

    /// Write a whole collection to its snapshot file (no-op when in-memory).
    async fn persist<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let Some(dir) = &self.snapshot_dir else {
            return Ok(());
        };

        let path = snapshot_path(dir, name);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(items)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", name, e)))?;

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            AppError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!(collection = name, count = items.len(), "Snapshot written");
        Ok(())
    }

    // ─── Player Operations ───────────────────────────────────────

    pub async fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.inner.read().await.players.clone())
    }

    pub async fn get_player(&self, id: &str) -> Result<Option<Player>> {
        Ok(self
            .inner
            .read()
            .await
            .players
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    /// Register a player, assigning a timestamp id when none is given.
    pub async fn insert_player(&self, command: &CreatePlayerCommand) -> Result<Player> {
        let mut guard = self.inner.write().await;

        let id = if command.id.trim().is_empty() {
            self.ids.next_id()
        } else {
            command.id.clone()
        };
        if guard.players.iter().any(|p| p.id == id) {
            return Err(AppError::Conflict(format!("Player {} already exists", id)));
        }

        let player = Player::new(id, command.name.clone());
        let mut next = guard.players.clone();
        next.push(player.clone());
        self.persist(collections::PLAYERS, &next).await?;
        guard.players = next;

        tracing::info!(player_id = %player.id, "Player registered");
        Ok(player)
    }

    // ─── Match Operations ────────────────────────────────────────

    pub async fn list_matches(&self) -> Result<Vec<Match>> {
        Ok(self.inner.read().await.matches.clone())
    }

    pub async fn get_match(&self, id: &str) -> Result<Option<Match>> {
        Ok(self
            .inner
            .read()
            .await
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    /// Create a match with no goals and a fresh id.
    pub async fn insert_match(&self, command: &CreateMatchCommand) -> Result<Match> {
        let mut guard = self.inner.write().await;

        let created = Match::new(self.ids.next_id(), command);
        let mut next = guard.matches.clone();
        next.push(created.clone());
        self.persist(collections::MATCHES, &next).await?;
        guard.matches = next;

        tracing::info!(
            match_id = %created.id,
            team_a = %created.team_a,
            team_b = %created.team_b,
            "Match created"
        );
        Ok(created)
    }

    /// Credit goals to a registered player. The stored player name is used.
    pub async fn add_goal(&self, match_id: &str, command: &AddGoalCommand) -> Result<Match> {
        self.update_match(match_id, |m, players| {
            let player = players
                .iter()
                .find(|p| p.id == command.player_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!("Player {} not found", command.player_id))
                })?;
            m.add_goal(player, &command.team, command.nb_goals)?;
            Ok(())
        })
        .await
    }

    /// Take back one goal. A player without an entry leaves the match as is.
    pub async fn remove_goal(&self, match_id: &str, team: &str, player_id: &str) -> Result<Match> {
        self.update_match(match_id, |m, _| {
            if !m.remove_goal(team, player_id)? {
                tracing::debug!(match_id, team, player_id, "No goal entry to remove");
            }
            Ok(())
        })
        .await
    }

    pub async fn complete_match(&self, match_id: &str) -> Result<Match> {
        self.update_match(match_id, |m, _| {
            m.complete();
            Ok(())
        })
        .await
    }

    /// Apply `change` to a copy of the match, then swap the copy in.
    async fn update_match<F>(&self, match_id: &str, change: F) -> Result<Match>
    where
        F: FnOnce(&mut Match, &[Player]) -> Result<()>,
    {
        let mut guard = self.inner.write().await;

        let index = guard
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {} not found", match_id)))?;

        let mut updated = guard.matches[index].clone();
        change(&mut updated, &guard.players)?;
        if updated == guard.matches[index] {
            return Ok(updated);
        }

        let mut next = guard.matches.clone();
        next[index] = updated.clone();
        self.persist(collections::MATCHES, &next).await?;
        guard.matches = next;

        Ok(updated)
    }
}

fn snapshot_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

async fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = snapshot_path(dir, name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("Corrupt snapshot {}: {}", path.display(), e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn command() -> CreateMatchCommand {
        CreateMatchCommand::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), "Reds", "Blues")
    }

    fn goal(player_id: &str, team: &str, nb_goals: u32) -> AddGoalCommand {
        AddGoalCommand {
            player_id: player_id.to_string(),
            player_name: "ignored".to_string(),
            team: team.to_string(),
            nb_goals,
        }
    }

    #[tokio::test]
    async fn test_add_goal_uses_stored_player_name() {
        let db = MemoryDb::new();
        let player = db
            .insert_player(&CreatePlayerCommand {
                id: "p1".to_string(),
                name: "Alice".to_string(),
            })
            .await
            .unwrap();
        let m = db.insert_match(&command()).await.unwrap();

        let updated = db.add_goal(&m.id, &goal(&player.id, "Reds", 2)).await.unwrap();

        let entry = &updated.goals.entries(crate::models::Side::A)[0];
        assert_eq!(entry.player_name, "Alice");
        assert_eq!(updated.score().goals_team_a, 2);
        assert_eq!(db.get_match(&m.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let db = MemoryDb::new();
        let m = db.insert_match(&command()).await.unwrap();

        let err = db.add_goal("nope", &goal("p1", "Reds", 1)).await.unwrap_err();
        assert!(err.is_not_found());

        let err = db.add_goal(&m.id, &goal("ghost", "Reds", 1)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_change_leaves_match_untouched() {
        let db = MemoryDb::new();
        db.insert_player(&CreatePlayerCommand {
            id: "p1".to_string(),
            name: "Alice".to_string(),
        })
        .await
        .unwrap();
        let m = db.insert_match(&command()).await.unwrap();

        let err = db.add_goal(&m.id, &goal("p1", "Greens", 1)).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTeam { .. }));
        assert_eq!(db.get_match(&m.id).await.unwrap(), Some(m));
    }

    #[tokio::test]
    async fn test_duplicate_player_id_conflicts() {
        let db = MemoryDb::new();
        let cmd = CreatePlayerCommand {
            id: "p1".to_string(),
            name: "Alice".to_string(),
        };
        db.insert_player(&cmd).await.unwrap();

        assert!(matches!(
            db.insert_player(&cmd).await,
            Err(AppError::Conflict(_))
        ));
        assert_eq!(db.list_players().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_player_id_is_assigned() {
        let db = MemoryDb::new();
        let player = db
            .insert_player(&CreatePlayerCommand {
                id: String::new(),
                name: "Bob".to_string(),
            })
            .await
            .unwrap();

        assert!(player.id.parse::<i64>().is_ok());
    }
}
