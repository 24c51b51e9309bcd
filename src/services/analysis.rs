// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Distance and elevation analysis over an ordered point sequence.
//!
//! Pure functions, no I/O. Empty and single-point sequences yield all-zero
//! statistics; rejecting them (or not) is the caller's decision.

use crate::models::{TrackPoint, TrailStats};
use geo::{Distance, Haversine, Point};

const METERS_PER_KM: f64 = 1000.0;

/// Compute trail statistics for an ordered point sequence.
///
/// Display values are rounded to 2 decimals, but the gradient is computed
/// from the unrounded meter total.
pub fn analyze(points: &[TrackPoint]) -> TrailStats {
    let distance_meters = total_distance_meters(points);
    let (gain, loss) = elevation_gain_loss(points);

    let gradient = if distance_meters > 0.0 {
        gain / distance_meters * 100.0
    } else {
        0.0
    };

    TrailStats {
        distance_km: round2(distance_meters / METERS_PER_KM),
        elevation_gain_m: round2(gain),
        elevation_loss_m: round2(loss),
        average_gradient_percent: round2(gradient),
    }
}

/// Sum of consecutive-point great-circle distances, in meters.
pub fn total_distance_meters(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| segment_distance(&w[0], &w[1]))
        .sum()
}

fn segment_distance(a: &TrackPoint, b: &TrackPoint) -> f64 {
    Haversine.distance(
        Point::new(a.longitude, a.latitude),
        Point::new(b.longitude, b.latitude),
    )
}

/// Separately accumulated gain and loss magnitudes (never net values).
fn elevation_gain_loss(points: &[TrackPoint]) -> (f64, f64) {
    let mut gain = 0.0;
    let mut loss = 0.0;

    for w in points.windows(2) {
        let delta = w[1].elevation - w[0].elevation;
        if delta > 0.0 {
            gain += delta;
        } else {
            loss -= delta;
        }
    }

    (gain, loss)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
