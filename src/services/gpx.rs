// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX parsing into ordered track points.

use crate::models::TrackPoint;

/// Errors from track-log parsing.
#[derive(Debug, thiserror::Error)]
pub enum GpxError {
    #[error("not a parseable GPX document: {0}")]
    Malformed(String),
}

/// Parse a GPX document into ordered track points.
///
/// Points come from track segments in document order; a document with no
/// tracks falls back to its routes (planners export those). A document that
/// parses but holds no points yields an empty vec: the error variant is
/// reserved for corrupt files, and the caller decides whether an empty
/// track is acceptable.
///
/// Latitude and longitude are mandatory attributes and fail the parse when
/// missing or non-numeric, so no NaN coordinate can reach the analyzer.
/// Missing elevations default to 0.
pub fn parse(raw: &[u8]) -> Result<Vec<TrackPoint>, GpxError> {
    let document = gpx::read(raw).map_err(|e| GpxError::Malformed(e.to_string()))?;

    let mut points = Vec::new();
    for track in &document.tracks {
        for segment in &track.segments {
            for waypoint in &segment.points {
                points.push(to_track_point(waypoint));
            }
        }
    }

    if points.is_empty() {
        for route in &document.routes {
            for waypoint in &route.points {
                points.push(to_track_point(waypoint));
            }
        }
    }

    Ok(points)
}

fn to_track_point(waypoint: &gpx::Waypoint) -> TrackPoint {
    let position = waypoint.point();
    TrackPoint {
        latitude: position.y(),
        longitude: position.x(),
        elevation: waypoint.elevation.unwrap_or(0.0),
    }
}
