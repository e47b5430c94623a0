//! Object storage endpoints.
//!
//! Product images live in a public bucket. Uploads are privileged (the
//! original deployment relayed them through a service-key process rather
//! than granting the storefront write access); public URLs are plain path
//! construction and need no key at all.

use reqwest::Method;
use url::Url;

use crate::PlatformError;
use crate::client::{KeyKind, PlatformClient};

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Errors specific to object uploads.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The payload exceeds [`MAX_UPLOAD_BYTES`].
    #[error("file too large: {size} bytes (limit {MAX_UPLOAD_BYTES})")]
    TooLarge {
        /// Size of the rejected payload.
        size: usize,
    },

    /// The platform call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl PlatformClient {
    /// Upload an object into `bucket` at `path` and return the stored
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TooLarge`] for oversized payloads, or the
    /// underlying [`PlatformError`] (including `MissingServiceKey`).
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, UploadError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { size: bytes.len() });
        }

        let endpoint = format!("storage/v1/object/{bucket}/{path}");
        let request = self
            .request(Method::POST, &endpoint, KeyKind::Service)?
            .header("Content-Type", content_type)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes);

        self.send(request).await?;
        Ok(path.to_owned())
    }

    /// Public URL for an object in a public bucket.
    #[must_use]
    pub fn public_object_url(&self, bucket: &str, path: &str) -> Url {
        self.endpoint(&format!("storage/v1/object/public/{bucket}/{path}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;

    #[test]
    fn test_public_object_url() {
        let config = PlatformConfig::new("https://proj.example.co", "anon").unwrap();
        let client = PlatformClient::new(&config);
        let url = client.public_object_url("product-images", "products/123_abc.png");
        assert_eq!(
            url.as_str(),
            "https://proj.example.co/storage/v1/object/public/product-images/products/123_abc.png"
        );
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_payload() {
        let config = PlatformConfig::new("https://proj.example.co", "anon")
            .unwrap()
            .with_service_key("service");
        let client = PlatformClient::new(&config);
        let oversized = vec![0_u8; MAX_UPLOAD_BYTES + 1];
        let result = client
            .upload_object("product-images", "products/too-big.bin", oversized, "application/octet-stream")
            .await;
        assert!(matches!(result, Err(UploadError::TooLarge { .. })));
    }
}
