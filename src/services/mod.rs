// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analysis;
pub mod geocoder;
pub mod geometry;
pub mod gpx;
pub mod ingest;
pub mod storage;

pub use geocoder::GeocoderClient;
pub use ingest::TrackIngestor;
pub use storage::StorageClient;
