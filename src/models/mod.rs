// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod stats;
pub mod track;

pub use stats::TrailStats;
pub use track::{NewTrack, TrackPoint, TrackRecord, TrackUpload};
