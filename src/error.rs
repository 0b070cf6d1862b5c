//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Failed to open image file {path}: {source}")]
    FileOpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download image from {url}: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to encode multipart body: {0}")]
    EncodingFailed(#[source] std::io::Error),

    #[error("Failed to generate image body: {0}")]
    GenerateImageFailed(#[source] Box<Error>),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Open API request failed: {0}")]
    OpenApiFailed(String),

    #[error("Failed to parse Open API response: {0}")]
    JsonUnmarshalFailed(#[from] serde_json::Error),

    #[error("Open API returned error [code:{code} msg:{msg}]")]
    OpenApiReturnError { code: i64, msg: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpCodeError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
