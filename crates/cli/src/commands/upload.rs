//! Product image upload command.
//!
//! Reads a local file, stores it under `products/` with a
//! collision-resistant name, and reports the public URL to paste into a
//! product record.

use std::path::Path;

use rand::Rng;
use rand::distr::Alphanumeric;
use thiserror::Error;

use luxe_platform::storage::UploadError;
use luxe_platform::{ConfigError, PlatformClient, PlatformConfig};

/// Errors that can occur during uploads.
#[derive(Debug, Error)]
pub enum UploadCommandError {
    /// Platform configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The local file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The upload was rejected or failed.
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

fn object_path(extension: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("products/{timestamp}_{suffix}.{extension}")
}

/// Upload a file into the given bucket and report its public URL.
///
/// # Errors
///
/// Fails if the platform is not configured, the file cannot be read, or
/// the upload is rejected (oversized payloads included).
pub async fn upload(file: &Path, bucket: &str) -> Result<(), UploadCommandError> {
    dotenvy::dotenv().ok();
    let config = PlatformConfig::from_env()?;
    let client = PlatformClient::new(&config);

    let bytes = tokio::fs::read(file)
        .await
        .map_err(|source| UploadCommandError::Read {
            path: file.display().to_string(),
            source,
        })?;

    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or_else(|| "bin".to_owned(), str::to_lowercase);
    let content_type = content_type_for(&extension);
    let path = object_path(&extension);

    tracing::info!(
        "Uploading {} ({} bytes) as {path}",
        file.display(),
        bytes.len()
    );
    let stored = client
        .upload_object(bucket, &path, bytes, content_type)
        .await?;

    let url = client.public_object_url(bucket, &stored);
    tracing::info!("Uploaded: {url}");
    Ok(())
}
