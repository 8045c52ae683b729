// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote access and application state.

pub mod api_client;
pub mod backend;
pub mod store;

pub use api_client::ApiClient;
pub use backend::SportsBackend;
pub use store::SportsStore;
