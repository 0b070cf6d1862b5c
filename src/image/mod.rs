//! Image upload and key resolution
//!
//! Reads an image from disk or a URL, packs it into a multipart body,
//! uploads it to the Open API and caches the returned image key per source
//! reference. Raw bytes for a known key can be fetched back.

pub mod acquire;
pub mod cache;
pub mod client;
pub mod mock;
pub mod multipart;
pub mod resolver;

pub use acquire::{ContentAcquirer, ImageSource};
pub use cache::{ImageKeyCache, LruImageKeyCache};
pub use client::OpenApiImageClient;
pub use mock::MockImageApiClient;
pub use multipart::{EncodedBody, MultipartEncoder};
pub use resolver::ImageResolver;

use crate::models::UploadImageResponse;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageApiService: Send + Sync {
    async fn upload_image(
        &self,
        tenant_key: &str,
        app_id: &str,
        body: EncodedBody,
    ) -> Result<UploadImageResponse>;

    async fn get_image(&self, tenant_key: &str, app_id: &str, image_key: &str)
        -> Result<Vec<u8>>;
}
