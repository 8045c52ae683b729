// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod commands;
pub mod goals;
pub mod matches;
pub mod player;
pub mod stats;

pub use commands::{AddGoalCommand, CreateMatchCommand, CreatePlayerCommand, RemoveGoalQuery};
pub use goals::{GoalCountError, GoalEntry, MatchGoals, Side};
pub use matches::{Match, MatchRecord, Score};
pub use player::Player;
pub use stats::{PlayerStats, ScorerTier};
