// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upload endpoint validation tests.
//!
//! The app is built with offline collaborators: any request that reaches
//! the blob store fails with `storage_error`, so a `validation_error`
//! response proves the chain stopped before any network call.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn post_upload(body: String) -> (StatusCode, Value) {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tracks")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", common::BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_missing_title_is_rejected_before_storage() {
    let body = common::multipart_body(&[
        ("file", Some("trace.gpx"), common::VALID_GPX),
        ("title", None, ""),
        ("sport", None, "Cross"),
        ("date_time", None, "2025-06-01T09:30:00Z"),
    ]);

    let (status, json) = post_upload(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["details"], "title");
}

#[tokio::test]
async fn test_missing_file_is_rejected() {
    let body = common::multipart_body(&[
        ("title", None, "Sortie canicross"),
        ("sport", None, "Cross"),
        ("date_time", None, "2025-06-01T09:30:00Z"),
    ]);

    let (status, json) = post_upload(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["details"], "file");
}

#[tokio::test]
async fn test_every_missing_field_is_named() {
    let body = common::multipart_body(&[
        ("file", Some("trace.gpx"), common::VALID_GPX),
        ("title", None, ""),
        ("sport", None, ""),
        ("date_time", None, ""),
    ]);

    let (status, json) = post_upload(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["details"], "date_time, sport, title");
}

#[tokio::test]
async fn test_invalid_date_time_is_rejected() {
    let body = common::multipart_body(&[
        ("file", Some("trace.gpx"), common::VALID_GPX),
        ("title", None, "Sortie canicross"),
        ("sport", None, "Cross"),
        ("date_time", None, "pas une date"),
    ]);

    let (status, json) = post_upload(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"], "date_time");
}

#[tokio::test]
async fn test_valid_upload_reaches_the_blob_store() {
    // Offline storage is the first collaborator in the chain, so a
    // storage_error response means validation passed and upload began.
    let body = common::multipart_body(&[
        ("file", Some("trace.gpx"), common::VALID_GPX),
        ("title", None, "Sortie canicross"),
        ("sport", None, "Cross"),
        ("date_time", None, "2025-06-01T09:30:00Z"),
    ]);

    let (status, json) = post_upload(body).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "storage_error");
    // 5xx responses never leak collaborator details
    assert!(json.get("details").is_none());
}
