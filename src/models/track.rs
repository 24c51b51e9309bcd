// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Track models for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single sample along a track.
///
/// Fields are named rather than positional: the persisted geometry text is
/// longitude-first while analysis reads latitude-first, and a bare tuple
/// cannot keep those straight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters; 0.0 when the source document has no elevation
    pub elevation: f64,
}

/// Stored track record in the `gpx_tracks` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Row ID assigned by the database
    pub id: i64,
    /// Display title, user-supplied
    pub name: String,
    /// Sport category (Cross, Marche, Trail, VTT, Trottinette)
    pub sport: String,
    /// When the outing took place (RFC3339), distinct from `created_at`
    pub date_time: String,
    /// LINESTRINGZ geometry text, source of truth for the points
    pub geom: String,
    /// Public URL of the raw uploaded file
    pub file_url: Option<String>,
    /// When this record was created (RFC3339)
    pub created_at: String,
}

/// Insert payload for a new track row.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrack {
    pub name: String,
    pub sport: String,
    pub date_time: String,
    pub geom: String,
    pub file_url: Option<String>,
    pub created_at: String,
}

/// User-supplied upload metadata, validated before any network call.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TrackUpload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub sport: String,
    /// RFC3339 date/time of the outing
    #[validate(length(min = 1))]
    pub date_time: String,
}
