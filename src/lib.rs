// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canitrail: GPX outing tracking for a dog-sports club
//!
//! This crate provides the backend API for ingesting GPX track logs,
//! deriving trail statistics, and persisting geometry records through
//! the club's hosted storage and database services.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::TracksDb;
use services::{GeocoderClient, StorageClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: TracksDb,
    pub storage: StorageClient,
    pub geocoder: GeocoderClient,
}
