//! Derived trail statistics.
//!
//! These are recomputed on demand from the point sequence and never
//! persisted; the geometry text is the only stored source of truth.

use serde::{Deserialize, Serialize};

/// Statistics derived from an ordered point sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailStats {
    /// Total horizontal distance in kilometers, rounded to 2 decimals
    pub distance_km: f64,
    /// Sum of positive elevation deltas in meters (always >= 0)
    pub elevation_gain_m: f64,
    /// Sum of negative elevation deltas in meters, as a magnitude (always >= 0)
    pub elevation_loss_m: f64,
    /// Elevation gain over horizontal distance, in percent, rounded to 2 decimals
    pub average_gradient_percent: f64,
}
