use super::{EncodedBody, ImageApiService};
use crate::auth::TokenService;
use crate::models::{UploadImageResponse, GET_IMAGE_PATH, UPLOAD_IMAGE_PATH};
use crate::openapi::{bearer, OpenApiHttpClient};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::sync::Arc;

pub struct OpenApiImageClient {
    http: OpenApiHttpClient,
    tokens: Arc<dyn TokenService>,
}

impl OpenApiImageClient {
    pub fn new(http: OpenApiHttpClient, tokens: Arc<dyn TokenService>) -> Self {
        Self { http, tokens }
    }

    async fn auth_headers(&self, tenant_key: &str, app_id: &str) -> Result<HeaderMap> {
        let token = self.tokens.tenant_access_token(tenant_key, app_id).await?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&bearer(&token))?);
        Ok(headers)
    }

    /// Best-effort; a failure here is logged and never replaces the caller's error.
    async fn disable_token(&self, app_id: &str, tenant_key: &str, code: i64) {
        if let Err(e) = self.tokens.disable_tenant_token(app_id, tenant_key, code).await {
            tracing::warn!(
                "Failed to disable tenant token for tenant[{}] app[{}] code[{}]: {}",
                tenant_key,
                app_id,
                code,
                e
            );
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::InvalidParameters(format!("invalid header value: {}", e)))
}

#[async_trait]
impl ImageApiService for OpenApiImageClient {
    async fn upload_image(
        &self,
        tenant_key: &str,
        app_id: &str,
        body: EncodedBody,
    ) -> Result<UploadImageResponse> {
        let mut headers = self.auth_headers(tenant_key, app_id).await?;
        headers.insert(CONTENT_TYPE, header_value(&body.content_type)?);

        let response = self.http.post(UPLOAD_IMAGE_PATH, headers, body.body).await?;
        if !response.status.is_success() {
            let error_text = String::from_utf8_lossy(&response.body);
            tracing::error!(
                "Image upload failed (status {}): {}",
                response.status,
                error_text
            );
            return Err(Error::OpenApiFailed(format!(
                "image upload returned status {}: {}",
                response.status, error_text
            )));
        }

        let rsp: UploadImageResponse = serde_json::from_slice(&response.body).map_err(|e| {
            tracing::error!(
                "Failed to parse upload response: {}\nBody: {}",
                e,
                String::from_utf8_lossy(&response.body)
            );
            Error::JsonUnmarshalFailed(e)
        })?;

        if !rsp.is_success() {
            tracing::error!(
                "Image upload rejected for tenant[{}] app[{}]: code[{}] msg[{}]",
                tenant_key,
                app_id,
                rsp.code,
                rsp.msg
            );
            self.disable_token(app_id, tenant_key, rsp.code).await;
            return Err(Error::OpenApiReturnError {
                code: rsp.code,
                msg: rsp.msg,
            });
        }

        tracing::info!("Uploaded image, got key {}", rsp.data.image_key);
        Ok(rsp)
    }

    async fn get_image(
        &self,
        tenant_key: &str,
        app_id: &str,
        image_key: &str,
    ) -> Result<Vec<u8>> {
        if app_id.is_empty() || image_key.is_empty() {
            return Err(Error::InvalidParameters(
                "app id and image key are required".to_string(),
            ));
        }

        let headers = self.auth_headers(tenant_key, app_id).await?;
        let response = self
            .http
            .get(GET_IMAGE_PATH, headers, &[("image_key", image_key)])
            .await?;

        if response.status != StatusCode::OK {
            let body = String::from_utf8_lossy(&response.body).to_string();
            tracing::error!(
                "Image fetch for {} failed (status {}): {}",
                image_key,
                response.status,
                body
            );
            return Err(Error::HttpCodeError {
                status: response.status.as_u16(),
                body,
            });
        }

        Ok(response.body)
    }
}
