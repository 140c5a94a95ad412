//! Object storage gateway for product images.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

use crate::config::{Config, PRODUCT_IMAGE_BUCKET, STORE_API_KEY_HEADER};
use crate::errors::{AppError, AppResult};

/// Extract the bucket path from a public object URL.
///
/// Returns `None` for URLs that do not point into the product image
/// bucket, so foreign URLs are never deleted from storage.
pub fn object_path(url: &str) -> Option<&str> {
    let marker = format!("/object/public/{PRODUCT_IMAGE_BUCKET}/");
    let start = url.find(&marker)? + marker.len();
    let path = &url[start..];
    (!path.is_empty()).then_some(path)
}

/// Blob upload/removal for the product image bucket.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store a blob and return its public URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String>;

    async fn delete(&self, path: &str) -> AppResult<()>;
}

/// HTTP implementation of [`ObjectStorage`] against the hosted bucket API.
pub struct BucketStorage {
    http: Client,
    endpoint: String,
}

impl BucketStorage {
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.store_api_key())
            .expect("store API key contains invalid header characters");
        headers.insert(STORE_API_KEY_HEADER, key);
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.store_api_key()))
            .expect("store API key contains invalid header characters");
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: config.storage_endpoint(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/object/{PRODUCT_IMAGE_BUCKET}/{path}", self.endpoint)
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/object/public/{PRODUCT_IMAGE_BUCKET}/{path}",
            self.endpoint
        )
    }
}

#[async_trait]
impl ObjectStorage for BucketStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let response = self
            .http
            .post(self.object_url(path))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::write("storage", e.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "upload failed".into());
            return Err(AppError::write("storage", message));
        }

        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let response = self
            .http
            .delete(self.object_url(path))
            .send()
            .await
            .map_err(|e| AppError::write("storage", e.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "delete failed".into());
            return Err(AppError::write("storage", message));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_maps_back_to_its_bucket_path() {
        let url = "https://store.example/storage/v1/object/public/product-images/7/abc-front.png";
        assert_eq!(object_path(url), Some("7/abc-front.png"));
    }

    #[test]
    fn foreign_urls_yield_no_path() {
        assert_eq!(object_path("https://cdn.example/other/img.png"), None);
        assert_eq!(
            object_path("https://store.example/storage/v1/object/public/product-images/"),
            None
        );
    }
}
