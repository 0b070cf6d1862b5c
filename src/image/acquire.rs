use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

/// Where the image bytes come from. Its string form is the cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(String),
    Url(String),
}

impl ImageSource {
    /// Picks the source from a caller's url/path pair. The path wins when both are set.
    pub fn from_parts(url: &str, path: &str) -> Result<Self> {
        if !path.is_empty() {
            Ok(ImageSource::Path(path.to_string()))
        } else if !url.is_empty() {
            Ok(ImageSource::Url(url.to_string()))
        } else {
            Err(Error::InvalidParameters(
                "either image url or path is required".to_string(),
            ))
        }
    }

    pub fn cache_key(&self) -> &str {
        match self {
            ImageSource::Path(path) => path,
            ImageSource::Url(url) => url,
        }
    }
}

/// Image bytes plus the filename to report in the multipart part.
#[derive(Debug, Clone)]
pub struct AcquiredImage {
    pub content: Vec<u8>,
    pub display_name: String,
}

/// Last `/`-separated token of the URL, or the whole URL without separators.
pub fn display_name_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

pub struct ContentAcquirer {
    client: Client,
}

impl ContentAcquirer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(client))
    }

    pub async fn acquire(&self, source: &ImageSource) -> Result<AcquiredImage> {
        match source {
            ImageSource::Path(path) => self.read_file(path).await,
            ImageSource::Url(url) => self.download(url).await,
        }
    }

    async fn read_file(&self, path: &str) -> Result<AcquiredImage> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| Error::FileOpenFailed {
                path: path.to_string(),
                source,
            })?;

        Ok(AcquiredImage {
            content,
            display_name: path.to_string(),
        })
    }

    async fn download(&self, url: &str) -> Result<AcquiredImage> {
        tracing::debug!("Downloading image from {}", url);

        let download_err = |source: reqwest::Error| {
            tracing::error!("Failed to download image from {}: {}", url, source);
            Error::DownloadFailed {
                url: url.to_string(),
                source,
            }
        };

        let content = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(download_err)?
            .bytes()
            .await
            .map_err(download_err)?
            .to_vec();

        Ok(AcquiredImage {
            content,
            display_name: display_name_from_url(url).to_string(),
        })
    }
}

impl Default for ContentAcquirer {
    fn default() -> Self {
        Self::new(Client::new())
    }
}
