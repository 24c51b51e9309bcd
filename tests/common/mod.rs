// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use canitrail::config::Config;
use canitrail::db::TracksDb;
use canitrail::routes::create_router;
use canitrail::services::{GeocoderClient, StorageClient};
use canitrail::AppState;
use std::sync::Arc;

/// Create a test app with offline mock collaborators.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let state = Arc::new(AppState {
        db: TracksDb::new_mock(),
        storage: StorageClient::new_mock(),
        geocoder: GeocoderClient::new_mock(),
        config,
    });

    (create_router(state.clone()), state)
}

/// Multipart boundary used by [`multipart_body`].
#[allow(dead_code)]
pub const BOUNDARY: &str = "canitrail-test-boundary";

/// Build a multipart/form-data body.
///
/// Each entry is `(field_name, optional_filename, value)`; entries with a
/// filename are sent as file parts with a GPX content type.
#[allow(dead_code)]
pub fn multipart_body(fields: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, filename, value) in fields {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match filename {
            Some(filename) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, filename
                ));
                body.push_str("Content-Type: application/gpx+xml\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n",
                    name
                ));
            }
        }
        body.push_str("\r\n");
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}

/// A parseable two-point GPX document.
#[allow(dead_code)]
pub const VALID_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg>
    <trkpt lat="48.0" lon="2.0"><ele>100.0</ele></trkpt>
    <trkpt lat="48.001" lon="2.001"><ele>150.0</ele></trkpt>
  </trkseg></trk>
</gpx>"#;
