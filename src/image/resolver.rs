//! Resolve-or-upload entry point for message images.

use super::{ContentAcquirer, ImageApiService, ImageKeyCache, ImageSource, MultipartEncoder};
use crate::models::ImageType;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Turns a path or URL into an image key, uploading only on a cache miss.
///
/// Concurrent calls for the same uncached source are not coalesced: each one
/// uploads and the last insert wins.
pub struct ImageResolver {
    acquirer: ContentAcquirer,
    api: Arc<dyn ImageApiService>,
    cache: Arc<dyn ImageKeyCache>,
}

impl ImageResolver {
    pub fn new(
        acquirer: ContentAcquirer,
        api: Arc<dyn ImageApiService>,
        cache: Arc<dyn ImageKeyCache>,
    ) -> Self {
        Self {
            acquirer,
            api,
            cache,
        }
    }

    /// Resolves `path` if set, otherwise `url`, to a message image key.
    pub async fn resolve(
        &self,
        tenant_key: &str,
        app_id: &str,
        url: &str,
        path: &str,
    ) -> Result<String> {
        let source = ImageSource::from_parts(url, path)?;
        self.resolve_source(tenant_key, app_id, &source).await
    }

    pub async fn resolve_source(
        &self,
        tenant_key: &str,
        app_id: &str,
        source: &ImageSource,
    ) -> Result<String> {
        let cache_key = source.cache_key();
        if let Some(image_key) = self.cache.get(cache_key) {
            debug!("Using cached image key {} for {}", image_key, cache_key);
            return Ok(image_key);
        }

        let body = self
            .generate_body(source)
            .await
            .map_err(|e| Error::GenerateImageFailed(Box::new(e)))?;

        let rsp = self.api.upload_image(tenant_key, app_id, body).await?;
        let image_key = rsp.data.image_key;

        self.cache.insert(cache_key, &image_key);
        info!("Resolved {} to image key {}", cache_key, image_key);

        Ok(image_key)
    }

    async fn generate_body(&self, source: &ImageSource) -> Result<super::EncodedBody> {
        let image = self.acquirer.acquire(source).await?;
        MultipartEncoder::encode(&image.content, &image.display_name, ImageType::Message)
    }
}
