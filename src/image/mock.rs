use super::{EncodedBody, ImageApiService};
use crate::models::{UploadImageData, UploadImageResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Clone)]
pub struct MockImageApiClient {
    image_keys: Arc<Mutex<Vec<String>>>,
    reject_code: Arc<Mutex<Option<i64>>>,
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    uploads: Arc<Mutex<Vec<EncodedBody>>>,
    upload_barrier: Option<Arc<Barrier>>,
}

impl MockImageApiClient {
    pub fn new() -> Self {
        Self {
            image_keys: Arc::new(Mutex::new(Vec::new())),
            reject_code: Arc::new(Mutex::new(None)),
            images: Arc::new(Mutex::new(HashMap::new())),
            uploads: Arc::new(Mutex::new(Vec::new())),
            upload_barrier: None,
        }
    }

    /// Keys are handed out in order, cycling once exhausted.
    pub fn with_image_key(self, image_key: String) -> Self {
        self.image_keys.lock().unwrap().push(image_key);
        self
    }

    pub fn with_rejection(self, code: i64) -> Self {
        *self.reject_code.lock().unwrap() = Some(code);
        self
    }

    pub fn with_image(self, image_key: String, content: Vec<u8>) -> Self {
        self.images.lock().unwrap().insert(image_key, content);
        self
    }

    /// Holds every upload until the barrier's party count has arrived.
    pub fn with_upload_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.upload_barrier = Some(barrier);
        self
    }

    pub fn get_upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn get_uploads(&self) -> Vec<EncodedBody> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockImageApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageApiService for MockImageApiClient {
    async fn upload_image(
        &self,
        _tenant_key: &str,
        _app_id: &str,
        body: EncodedBody,
    ) -> Result<UploadImageResponse> {
        let count = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(body);
            uploads.len()
        };

        if let Some(barrier) = &self.upload_barrier {
            barrier.wait().await;
        }

        if let Some(code) = *self.reject_code.lock().unwrap() {
            return Err(Error::OpenApiReturnError {
                code,
                msg: "mock rejection".to_string(),
            });
        }

        let keys = self.image_keys.lock().unwrap();
        let image_key = if keys.is_empty() {
            format!("img_v2_mock_{}", count)
        } else {
            keys[(count - 1) % keys.len()].clone()
        };

        Ok(UploadImageResponse {
            code: 0,
            msg: "ok".to_string(),
            data: UploadImageData { image_key },
        })
    }

    async fn get_image(
        &self,
        _tenant_key: &str,
        app_id: &str,
        image_key: &str,
    ) -> Result<Vec<u8>> {
        if app_id.is_empty() || image_key.is_empty() {
            return Err(Error::InvalidParameters(
                "app id and image key are required".to_string(),
            ));
        }

        match self.images.lock().unwrap().get(image_key) {
            Some(data) => Ok(data.clone()),
            None => Err(Error::HttpCodeError {
                status: 404,
                body: format!("image not found: {}", image_key),
            }),
        }
    }
}
