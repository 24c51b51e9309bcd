// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blob storage client for raw GPX uploads (Supabase storage object API).

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Timeout for a single storage call.
const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Object key used when a sanitized filename comes out empty.
const FALLBACK_FILENAME: &str = "track.gpx";

/// Storage client for the GPX bucket.
#[derive(Clone)]
pub struct StorageClient {
    http: Option<reqwest::Client>,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(base_url: &str, service_key: &str, bucket: &str) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            bucket: bucket.to_string(),
        }
    }

    /// Create a mock storage client for testing (offline mode).
    ///
    /// All storage operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            http: None,
            base_url: String::new(),
            service_key: String::new(),
            bucket: "gpx".to_string(),
        }
    }

    fn get_client(&self) -> Result<&reqwest::Client, AppError> {
        self.http
            .as_ref()
            .ok_or_else(|| AppError::Storage("Storage not connected (offline mode)".to_string()))
    }

    /// Upload raw file content under the given object key.
    ///
    /// Keys embed an upload timestamp (see [`object_key`]), so collisions
    /// are not expected and upsert is disabled.
    pub async fn upload(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), AppError> {
        let response = self
            .get_client()?
            .post(self.object_url(key))
            .timeout(STORAGE_TIMEOUT)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(content.to_vec())
            .send()
            .await
            .map_err(|e| Self::request_error(e, "storage upload"))?;

        Self::check_response(response, "storage upload").await
    }

    /// Delete an object (used to clean up after a failed ingest).
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let response = self
            .get_client()?
            .delete(self.object_url(key))
            .timeout(STORAGE_TIMEOUT)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|e| Self::request_error(e, "storage delete"))?;

        Self::check_response(response, "storage delete").await
    }

    /// Public download URL for an object. Pure string construction, no I/O.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }

    fn request_error(e: reqwest::Error, step: &'static str) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(step)
        } else {
            AppError::Storage(e.to_string())
        }
    }

    async fn check_response(response: reqwest::Response, step: &str) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Storage(format!(
            "{} failed with HTTP {}: {}",
            step, status, body
        )))
    }
}

/// Build a collision-resistant object key for an uploaded file.
pub fn object_key(filename: &str, uploaded_at: DateTime<Utc>) -> String {
    let mut safe = sanitize_filename(filename);
    if safe.is_empty() {
        safe = FALLBACK_FILENAME.to_string();
    }
    format!("{}_{}", uploaded_at.timestamp_millis(), safe)
}

/// Normalize a user-supplied filename into a safe object key fragment.
///
/// Storage keys are restricted to a safe ASCII set: accents are folded and
/// anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match fold_diacritic(c) {
            Some(folded) => out.push(folded),
            None if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => out.push(c),
            None => out.push('_'),
        }
    }
    out
}

fn fold_diacritic(c: char) -> Option<char> {
    Some(match c {
        'à' | 'á' | 'â' | 'ä' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'À' | 'Á' | 'Â' | 'Ä' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        _ => return None,
    })
}
