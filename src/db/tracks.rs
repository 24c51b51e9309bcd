// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database client for track records, speaking PostgREST conventions.
//!
//! Tracks are insert-only: there is no update path, and deletion happens
//! through the owning storage object, outside this service.

use crate::db::tables;
use crate::error::AppError;
use crate::models::{NewTrack, TrackRecord};
use std::time::Duration;

/// Timeout for a single database call.
const DB_TIMEOUT: Duration = Duration::from_secs(30);

/// Database client for the `gpx_tracks` table.
#[derive(Clone)]
pub struct TracksDb {
    http: Option<reqwest::Client>,
    base_url: String,
    service_key: String,
}

impl TracksDb {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            http: None,
            base_url: String::new(),
            service_key: String::new(),
        }
    }

    fn get_client(&self) -> Result<&reqwest::Client, AppError> {
        self.http
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, tables::GPX_TRACKS)
    }

    /// Insert a track row and return the stored record (with its ID).
    pub async fn insert_track(&self, row: &NewTrack) -> Result<TrackRecord, AppError> {
        let response = self
            .get_client()?
            .post(self.table_url())
            .timeout(DB_TIMEOUT)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| Self::request_error(e, "database insert"))?;

        let mut rows: Vec<TrackRecord> = Self::check_response_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::Database("Insert returned no representation".to_string()))
    }

    /// List tracks, newest outing first, with optional sport filter.
    pub async fn list_tracks(
        &self,
        sport: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRecord>, AppError> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "date_time.desc".to_string()),
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        if let Some(sport) = sport {
            query.push(("sport".to_string(), format!("eq.{}", sport)));
        }

        let response = self
            .get_client()?
            .get(self.table_url())
            .timeout(DB_TIMEOUT)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| Self::request_error(e, "database query"))?;

        Self::check_response_json(response).await
    }

    /// Get a track by ID.
    pub async fn get_track(&self, id: i64) -> Result<Option<TrackRecord>, AppError> {
        let id_filter = format!("eq.{}", id);
        let response = self
            .get_client()?
            .get(self.table_url())
            .timeout(DB_TIMEOUT)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .send()
            .await
            .map_err(|e| Self::request_error(e, "database query"))?;

        let rows: Vec<TrackRecord> = Self::check_response_json(response).await?;
        Ok(rows.into_iter().next())
    }

    fn request_error(e: reqwest::Error, step: &'static str) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(step)
        } else {
            AppError::Database(e.to_string())
        }
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> serde::Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Database(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Database(format!("JSON parse error: {}", e)))
    }
}
