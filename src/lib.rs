// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Sports-Tracker: match results, goal scorers and rankings for a sports association
//!
//! This crate provides the data model and goal bookkeeping, the client-side
//! store and HTTP client for the sports API, and a reference implementation
//! of that API.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
}
