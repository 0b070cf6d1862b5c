//! Data models and structures
//!
//! Defines the Open API wire formats for image upload and the runtime
//! configuration read from the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const UPLOAD_IMAGE_PATH: &str = "/open-apis/image/v4/put/";
pub const GET_IMAGE_PATH: &str = "/open-apis/image/v4/get";

/// Classification tag sent as the `image_type` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Message,
    Avatar,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Message => "message",
            ImageType::Avatar => "avatar",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UploadImageData {
    #[serde(default)]
    pub image_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadImageResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: UploadImageData,
}

impl UploadImageResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

// Configuration
pub const DEFAULT_OPEN_API_HOST: &str = "https://open.feishu.cn";
pub const DEFAULT_CACHE_CAPACITY: usize = 1_000_000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub open_api_host: String,
    pub tenant_access_token: Option<String>,
    pub cache_capacity: usize,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup; unset variables take their defaults.
    pub fn from_vars<F>(var: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_capacity = match var("IMAGE_CACHE_CAPACITY") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                crate::Error::Config(format!("IMAGE_CACHE_CAPACITY '{}' is invalid: {}", raw, e))
            })?,
            None => DEFAULT_CACHE_CAPACITY,
        };

        let timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                crate::Error::Config(format!("HTTP_TIMEOUT_SECS '{}' is invalid: {}", raw, e))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            open_api_host: var("LARK_OPEN_API_HOST")
                .unwrap_or_else(|| DEFAULT_OPEN_API_HOST.to_string()),
            tenant_access_token: var("LARK_TENANT_ACCESS_TOKEN").filter(|t| !t.is_empty()),
            cache_capacity,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
