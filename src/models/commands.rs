// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command payloads sent to the sports API.
//!
//! Only required-field checks (plus the form's goal-count bound) are
//! enforced here; domain rules live on the models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::calendar_date;

/// Largest number of goals the add-goal form accepts in one submission.
pub const MAX_GOALS_PER_SUBMISSION: u32 = 10;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn distinct_teams(command: &CreateMatchCommand) -> Result<(), ValidationError> {
    if command.team_a == command.team_b {
        return Err(ValidationError::new("distinct_teams")
            .with_message(Cow::Borrowed("teamA and teamB must differ")));
    }
    Ok(())
}

/// Body of `POST /api/matches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "distinct_teams"))]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateMatchCommand {
    #[serde(with = "calendar_date")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    #[validate(custom(function = "not_blank"))]
    pub team_a: String,
    #[validate(custom(function = "not_blank"))]
    pub team_b: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl CreateMatchCommand {
    pub fn new(date: NaiveDate, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            date,
            team_a: team_a.into(),
            team_b: team_b.into(),
            is_completed: false,
        }
    }
}

/// Body of `POST /api/matches/{id}/goals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AddGoalCommand {
    #[validate(custom(function = "not_blank"))]
    pub player_id: String,
    #[serde(default)]
    pub player_name: String,
    #[validate(custom(function = "not_blank"))]
    pub team: String,
    #[validate(range(min = 1, max = MAX_GOALS_PER_SUBMISSION))]
    pub nb_goals: u32,
}

/// Query of `DELETE /api/matches/{id}/goals/{playerId}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoveGoalQuery {
    #[validate(custom(function = "not_blank"))]
    pub team: String,
}

/// Body of `POST /api/players`. A blank id asks the backend to assign one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreatePlayerCommand {
    #[serde(default)]
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}
