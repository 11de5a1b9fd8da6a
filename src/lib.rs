// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OctoFit Tracker: fitness tracking for teams
//!
//! This crate provides the backend API for users, teams, logged activities,
//! period leaderboards and workout suggestions.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Datastore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Datastore,
}
