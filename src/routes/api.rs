// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for tracks.

use crate::error::{AppError, Result};
use crate::models::{TrackPoint, TrackRecord, TrackUpload, TrailStats};
use crate::services::{analysis, geometry, TrackIngestor};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tracks", get(list_tracks).post(upload_track))
        .route("/api/tracks/{id}", get(get_track))
}

// ─── Upload ──────────────────────────────────────────────────

/// Response for a successful track upload.
#[derive(Serialize)]
pub struct UploadTrackResponse {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub date_time: String,
    pub file_url: Option<String>,
    pub stats: TrailStats,
}

/// Ingest an uploaded GPX file with its metadata.
///
/// Multipart fields: `file` (the GPX document), `title`, `sport`,
/// `date_time` (RFC3339 outing time).
async fn upload_track(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadTrackResponse>> {
    let mut filename = String::new();
    let mut file: Option<Vec<u8>> = None;
    let mut metadata = TrackUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if let Some(original) = field.file_name() {
                    filename = original.to_string();
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some(bytes.to_vec());
            }
            "title" => metadata.title = read_text_field(field).await?,
            "sport" => metadata.sport = read_text_field(field).await?,
            "date_time" => metadata.date_time = read_text_field(field).await?,
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("file".to_string()))?;

    let ingestor = TrackIngestor::new(state.storage.clone(), state.db.clone());
    let result = ingestor.ingest(&filename, &file, &metadata).await?;

    Ok(Json(UploadTrackResponse {
        id: result.track.id,
        name: result.track.name,
        sport: result.track.sport,
        date_time: result.track.date_time,
        file_url: result.track.file_url,
        stats: result.stats,
    }))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {}", e)))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct TracksQuery {
    /// Filter by sport category
    sport: Option<String>,
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;
const MAX_SPORT_LEN: usize = 100;

/// Clamp pagination parameters into a (limit, offset) pair.
fn page_limits(page: u32, per_page: u32) -> (u32, u32) {
    let limit = per_page.clamp(1, MAX_PER_PAGE);
    let offset = page.saturating_sub(1).saturating_mul(limit);
    (limit, offset)
}

#[derive(Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<TrackSummary>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Serialize, Clone, Debug)]
pub struct TrackSummary {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub date_time: String,
    pub file_url: Option<String>,
}

/// List persisted tracks, newest outing first.
async fn list_tracks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TracksQuery>,
) -> Result<Json<TracksResponse>> {
    if let Some(sport) = &params.sport {
        if sport.len() > MAX_SPORT_LEN {
            return Err(AppError::BadRequest(
                "Invalid 'sport' parameter: too long".to_string(),
            ));
        }
    }

    let (limit, offset) = page_limits(params.page, params.per_page);

    tracing::debug!(sport = ?params.sport, page = params.page, "Fetching tracks");

    let records = state
        .db
        .list_tracks(params.sport.as_deref(), limit, offset)
        .await?;

    let tracks = records
        .into_iter()
        .map(|record| TrackSummary {
            id: record.id,
            name: record.name,
            sport: record.sport,
            date_time: record.date_time,
            file_url: record.file_url,
        })
        .collect();

    Ok(Json(TracksResponse {
        tracks,
        page: params.page,
        per_page: limit,
    }))
}

// ─── Detail (read path) ──────────────────────────────────────

#[derive(Serialize)]
pub struct TrackDetailResponse {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub date_time: String,
    pub file_url: Option<String>,
    pub stats: TrailStats,
    /// Resolved lazily from the first point; placeholder on failure
    pub start_address: String,
    /// Decoded points for map display, path order
    pub points: Vec<TrackPoint>,
}

/// Get one track with recomputed statistics and its starting address.
async fn get_track(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TrackDetailResponse>> {
    let record: TrackRecord = state
        .db
        .get_track(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Track {}", id)))?;

    // The stored geometry is the source of truth; statistics are derived
    // from it on every read rather than persisted
    let points = geometry::decode(&record.geom)?;
    let stats = analysis::analyze(&points);

    let start = &points[0];
    let start_address = state
        .geocoder
        .resolve_address(start.latitude, start.longitude)
        .await;

    Ok(Json(TrackDetailResponse {
        id: record.id,
        name: record.name,
        sport: record.sport,
        date_time: record.date_time,
        file_url: record.file_url,
        stats,
        start_address,
        points,
    }))
}
