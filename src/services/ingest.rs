// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Track ingestion orchestrator.
//!
//! Handles the upload workflow as one linear chain:
//! 1. Validate metadata and file presence (fail fast, before any network call)
//! 2. Upload the raw file to blob storage
//! 3. Parse the track points, requiring a line-worthy track
//! 4. Analyze distance and elevation
//! 5. Encode the LINESTRINGZ geometry
//! 6. Insert the database row
//!
//! The chain is not atomic across the two external writes. A failure after
//! step 2 triggers a best-effort delete of the uploaded object, so a failed
//! ingest does not leave an orphan blob behind.

use crate::db::TracksDb;
use crate::error::{AppError, Result};
use crate::models::{NewTrack, TrackRecord, TrackUpload, TrailStats};
use crate::services::storage::{self, StorageClient};
use crate::services::{analysis, geometry, gpx};
use crate::time_utils;
use validator::Validate;

const GPX_CONTENT_TYPE: &str = "application/gpx+xml";

/// Ingest an uploaded track file into storage and the database.
pub struct TrackIngestor {
    storage: StorageClient,
    db: TracksDb,
}

impl TrackIngestor {
    pub fn new(storage: StorageClient, db: TracksDb) -> Self {
        Self { storage, db }
    }

    /// Run the full ingest chain for one uploaded file.
    pub async fn ingest(
        &self,
        filename: &str,
        file: &[u8],
        metadata: &TrackUpload,
    ) -> Result<IngestResult> {
        // 1. Validate before touching any collaborator
        validate_metadata(metadata)?;
        if file.is_empty() {
            return Err(AppError::Validation("file".to_string()));
        }

        let uploaded_at = chrono::Utc::now();
        let object_key = storage::object_key(filename, uploaded_at);

        tracing::info!(
            title = %metadata.title,
            sport = %metadata.sport,
            object_key = %object_key,
            size = file.len(),
            "Ingesting track"
        );

        // 2. Upload the raw file
        self.storage
            .upload(&object_key, file, GPX_CONTENT_TYPE)
            .await?;

        // 3..6, compensating for the already-uploaded blob on failure
        match self.finish(&object_key, file, metadata, uploaded_at).await {
            Ok(result) => {
                tracing::info!(
                    track_id = result.track.id,
                    distance_km = result.stats.distance_km,
                    "Track ingested"
                );
                Ok(result)
            }
            Err(err) => {
                self.cleanup_orphan(&object_key).await;
                Err(err)
            }
        }
    }

    /// Steps after the blob upload: parse, analyze, encode, persist.
    async fn finish(
        &self,
        object_key: &str,
        file: &[u8],
        metadata: &TrackUpload,
        uploaded_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<IngestResult> {
        // 3. Parse; a single-point track cannot be persisted as a line
        //    geometry, so reject it here with a clear error
        let points = gpx::parse(file)?;
        if points.len() < geometry::MIN_LINE_POINTS {
            return Err(AppError::InsufficientGeometry(points.len()));
        }

        // 4. Analyze
        let stats = analysis::analyze(&points);

        // 5. Encode
        let geom = geometry::encode(&points)?;

        // 6. Persist
        let row = NewTrack {
            name: metadata.title.clone(),
            sport: metadata.sport.clone(),
            date_time: metadata.date_time.clone(),
            geom,
            file_url: Some(self.storage.public_url(object_key)),
            created_at: time_utils::format_utc_rfc3339(uploaded_at),
        };
        let track = self.db.insert_track(&row).await?;

        Ok(IngestResult { track, stats })
    }

    /// Best-effort removal of the uploaded object after a failed ingest.
    /// A failed cleanup is logged and never masks the original error.
    async fn cleanup_orphan(&self, object_key: &str) {
        match self.storage.delete(object_key).await {
            Ok(()) => {
                tracing::info!(object_key, "Deleted orphaned upload after failed ingest");
            }
            Err(err) => {
                tracing::warn!(object_key, error = %err, "Failed to delete orphaned upload");
            }
        }
    }
}

/// Result of a successful ingest.
#[derive(Debug)]
pub struct IngestResult {
    pub track: TrackRecord,
    pub stats: TrailStats,
}

/// Check required metadata fields, naming every offending one.
fn validate_metadata(metadata: &TrackUpload) -> Result<()> {
    let mut fields: Vec<String> = match metadata.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
    };

    // A non-empty date must also be a real timestamp
    if !metadata.date_time.is_empty()
        && time_utils::parse_utc_rfc3339(&metadata.date_time).is_none()
    {
        fields.push("date_time".to_string());
    }

    if fields.is_empty() {
        return Ok(());
    }

    fields.sort_unstable();
    fields.dedup();
    Err(AppError::Validation(fields.join(", ")))
}
