// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LINESTRINGZ encoding and decoding of point sequences.
//!
//! The persisted text is longitude-first (`lon lat ele` triples), while the
//! rest of the crate works with named-field [`TrackPoint`]s. The axis swap
//! lives in this module and nowhere else.

use crate::models::TrackPoint;

/// Minimum number of points for a valid line geometry.
pub const MIN_LINE_POINTS: usize = 2;

/// Errors from geometry text handling.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("line geometry requires at least {MIN_LINE_POINTS} points, got {0}")]
    InsufficientPoints(usize),

    #[error("invalid geometry text: {0}")]
    Invalid(String),
}

/// Encode points as `LINESTRINGZ(lon lat ele, ...)`.
///
/// Formatting is locale-independent: ASCII decimal points, space-separated
/// triples, comma-space-separated points.
pub fn encode(points: &[TrackPoint]) -> Result<String, GeometryError> {
    if points.len() < MIN_LINE_POINTS {
        return Err(GeometryError::InsufficientPoints(points.len()));
    }

    let triples: Vec<String> = points
        .iter()
        .map(|p| format!("{} {} {}", p.longitude, p.latitude, p.elevation))
        .collect();

    Ok(format!("LINESTRINGZ({})", triples.join(", ")))
}

/// Decode a `LINESTRINGZ(...)` text back into track points.
///
/// Also accepts the `LINESTRING Z (...)` spelling some databases normalize to.
pub fn decode(text: &str) -> Result<Vec<TrackPoint>, GeometryError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("LINESTRINGZ(")
        .or_else(|| trimmed.strip_prefix("LINESTRING Z ("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| GeometryError::Invalid("expected LINESTRINGZ(...)".to_string()))?;

    let mut points = Vec::new();
    for triple in inner.split(',') {
        let mut parts = triple.split_whitespace();
        let (Some(lon), Some(lat), Some(ele), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(GeometryError::Invalid(format!(
                "expected `lon lat ele`, got `{}`",
                triple.trim()
            )));
        };

        points.push(TrackPoint {
            longitude: parse_coordinate(lon)?,
            latitude: parse_coordinate(lat)?,
            elevation: parse_coordinate(ele)?,
        });
    }

    if points.len() < MIN_LINE_POINTS {
        return Err(GeometryError::InsufficientPoints(points.len()));
    }

    Ok(points)
}

fn parse_coordinate(raw: &str) -> Result<f64, GeometryError> {
    raw.parse()
        .map_err(|_| GeometryError::Invalid(format!("invalid number `{}`", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64, elevation: f64) -> TrackPoint {
        TrackPoint {
            latitude,
            longitude,
            elevation,
        }
    }

    #[test]
    fn test_encode_exact_text() {
        let points = [point(48.0, 2.0, 100.0), point(48.001, 2.001, 150.0)];
        let text = encode(&points).unwrap();
        assert_eq!(text, "LINESTRINGZ(2 48 100, 2.001 48.001 150)");
    }

    #[test]
    fn test_encode_is_longitude_first() {
        // latitude 48, longitude 2: the text must lead with the longitude
        let points = [point(48.0, 2.0, 0.0), point(48.0, 3.0, 0.0)];
        let text = encode(&points).unwrap();
        assert!(text.starts_with("LINESTRINGZ(2 48"));
    }

    #[test]
    fn test_encode_rejects_short_sequences() {
        assert!(matches!(
            encode(&[]),
            Err(GeometryError::InsufficientPoints(0))
        ));
        assert!(matches!(
            encode(&[point(48.0, 2.0, 0.0)]),
            Err(GeometryError::InsufficientPoints(1))
        ));
    }

    #[test]
    fn test_decode_restores_named_fields() {
        let points = decode("LINESTRINGZ(2 48 100, 2.001 48.001 150)").unwrap();
        assert_eq!(points.len(), 2);
        // Axis order: text was lon-first, struct fields must come back named
        assert_eq!(points[0].longitude, 2.0);
        assert_eq!(points[0].latitude, 48.0);
        assert_eq!(points[0].elevation, 100.0);
    }

    #[test]
    fn test_decode_accepts_spaced_spelling() {
        let points = decode("LINESTRING Z (2 48 0, 3 49 10)").unwrap();
        assert_eq!(points[1].latitude, 49.0);
    }

    #[test]
    fn test_round_trip() {
        let points = vec![
            point(48.856614, 2.3522219, 35.0),
            point(48.857, 2.3525, 36.5),
            point(48.8575, 2.353, 34.25),
        ];

        let decoded = decode(&encode(&points).unwrap()).unwrap();

        assert_eq!(decoded.len(), points.len());
        for (original, restored) in points.iter().zip(&decoded) {
            assert!((original.latitude - restored.latitude).abs() < 1e-6);
            assert!((original.longitude - restored.longitude).abs() < 1e-6);
            assert!((original.elevation - restored.elevation).abs() < 1e-6);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("POINT(2 48)").is_err());
        assert!(decode("LINESTRINGZ(2 48)").is_err());
        assert!(decode("LINESTRINGZ(2 48 abc, 3 49 0)").is_err());
        assert!(decode("LINESTRINGZ(2 48 0 7, 3 49 0)").is_err());
    }

    #[test]
    fn test_decode_rejects_single_point_geometry() {
        assert!(matches!(
            decode("LINESTRINGZ(2 48 0)"),
            Err(GeometryError::InsufficientPoints(1))
        ));
    }
}
