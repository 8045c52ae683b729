// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sports API routes: players, matches, goals and derived stats.

use crate::error::{AppError, Result};
use crate::models::stats::{self, PlayerStats};
use crate::models::{
    AddGoalCommand, CreateMatchCommand, CreatePlayerCommand, Match, Player, RemoveGoalQuery,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/players", get(list_players).post(create_player))
        .route("/api/matches", get(list_matches).post(create_match))
        .route("/api/matches/{id}/goals", post(add_goal))
        .route("/api/matches/{id}/goals/{player_id}", delete(remove_goal))
        .route("/api/matches/{id}/complete", post(complete_match))
        .route("/api/stats/players", get(player_stats))
        .route("/api/stats/top-scorers", get(top_scorers))
}

// ─── Players ─────────────────────────────────────────────────

async fn list_players(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Player>>> {
    Ok(Json(state.db.list_players().await?))
}

async fn create_player(
    State(state): State<Arc<AppState>>,
    Json(command): Json<CreatePlayerCommand>,
) -> Result<(StatusCode, Json<Player>)> {
    command.validate()?;
    let player = state.db.insert_player(&command).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

// ─── Matches ─────────────────────────────────────────────────

async fn list_matches(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Match>>> {
    Ok(Json(state.db.list_matches().await?))
}

async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(command): Json<CreateMatchCommand>,
) -> Result<(StatusCode, Json<Match>)> {
    command.validate()?;
    let created = state.db.insert_match(&command).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn complete_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<Json<Match>> {
    tracing::info!(match_id = %match_id, "Completing match");
    Ok(Json(state.db.complete_match(&match_id).await?))
}

// ─── Goals ───────────────────────────────────────────────────

async fn add_goal(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
    Json(command): Json<AddGoalCommand>,
) -> Result<Json<Match>> {
    command.validate()?;

    tracing::debug!(
        match_id = %match_id,
        player_id = %command.player_id,
        team = %command.team,
        nb_goals = command.nb_goals,
        "Adding goal"
    );

    Ok(Json(state.db.add_goal(&match_id, &command).await?))
}

async fn remove_goal(
    State(state): State<Arc<AppState>>,
    Path((match_id, player_id)): Path<(String, String)>,
    Query(query): Query<RemoveGoalQuery>,
) -> Result<Json<Match>> {
    query.validate()?;
    if player_id.trim().is_empty() {
        return Err(AppError::BadRequest("Player id is required".to_string()));
    }

    tracing::debug!(
        match_id = %match_id,
        player_id = %player_id,
        team = %query.team,
        "Removing goal"
    );

    Ok(Json(
        state
            .db
            .remove_goal(&match_id, &query.team, &player_id)
            .await?,
    ))
}

// ─── Stats ───────────────────────────────────────────────────

/// Every player's stats, ranked by total goals.
async fn player_stats(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PlayerStats>>> {
    let players = state.db.list_players().await?;
    let matches = state.db.list_matches().await?;
    Ok(Json(stats::rank(stats::compute_stats(&players, &matches))))
}

async fn top_scorers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PlayerStats>>> {
    let players = state.db.list_players().await?;
    let matches = state.db.list_matches().await?;
    Ok(Json(stats::top_scorers(&players, &matches)))
}
