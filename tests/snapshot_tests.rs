// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence of the in-memory database to per-collection JSON snapshots.

use chrono::NaiveDate;
use sports_tracker::db::MemoryDb;
use sports_tracker::error::AppError;
use sports_tracker::models::{AddGoalCommand, CreateMatchCommand, CreatePlayerCommand};

fn goal(player_id: &str, team: &str, nb_goals: u32) -> AddGoalCommand {
    AddGoalCommand {
        player_id: player_id.to_string(),
        player_name: String::new(),
        team: team.to_string(),
        nb_goals,
    }
}

#[tokio::test]
async fn test_snapshots_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let db = MemoryDb::open(dir.path()).await.unwrap();
    db.insert_player(&CreatePlayerCommand {
        id: "p1".to_string(),
        name: "Alice".to_string(),
    })
    .await
    .unwrap();
    let m = db
        .insert_match(&CreateMatchCommand::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "Reds",
            "Blues",
        ))
        .await
        .unwrap();
    db.add_goal(&m.id, &goal("p1", "Blues", 3)).await.unwrap();
    db.remove_goal(&m.id, "Blues", "p1").await.unwrap();
    db.complete_match(&m.id).await.unwrap();
    let expected = db.list_matches().await.unwrap();
    drop(db);

    let reopened = MemoryDb::open(dir.path()).await.unwrap();
    assert_eq!(reopened.list_matches().await.unwrap(), expected);
    assert_eq!(reopened.list_players().await.unwrap().len(), 1);

    let stored = reopened.get_match(&m.id).await.unwrap().unwrap();
    assert_eq!(stored.score().goals_team_b, 2);
    assert!(stored.is_completed);
}

#[tokio::test]
async fn test_snapshot_files_hold_whole_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let db = MemoryDb::open(dir.path()).await.unwrap();
    for (id, name) in [("p1", "Alice"), ("p2", "Bob")] {
        db.insert_player(&CreatePlayerCommand {
            id: id.to_string(),
            name: name.to_string(),
        })
        .await
        .unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join("players.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "id": "p1", "name": "Alice" },
            { "id": "p2", "name": "Bob" }
        ])
    );
    assert!(!dir.path().join("matches.json").exists());
}

#[tokio::test]
async fn test_open_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("data");

    let db = MemoryDb::open(&nested).await.unwrap();

    assert!(nested.is_dir());
    assert!(db.list_players().await.unwrap().is_empty());
    assert!(db.list_matches().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_snapshot_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("matches.json"), "{ not json").unwrap();

    let err = MemoryDb::open(dir.path()).await.err().unwrap();

    assert!(matches!(err, AppError::Storage(_)));
}

#[tokio::test]
async fn test_snapshot_from_older_backend_format_loads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("matches.json"),
        r#"[{
            "id": "1718000000000",
            "date": [2024, 6, 10],
            "teamA": "Reds",
            "teamB": "Blues",
            "score": { "goalsTeamA": 1, "goalsTeamB": 0 },
            "goals": {
                "Reds": [{ "playerId": "p1", "playerName": "Alice", "team": "Reds", "nbGoals": 1 }]
            },
            "isCompleted": true
        }]"#,
    )
    .unwrap();

    let db = MemoryDb::open(dir.path()).await.unwrap();
    let m = db.get_match("1718000000000").await.unwrap().unwrap();

    assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    assert_eq!(m.score().goals_team_a, 1);
}
