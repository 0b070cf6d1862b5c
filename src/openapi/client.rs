use crate::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;

/// Status and raw body of an Open API response.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Thin reqwest wrapper that resolves paths against the Open API host.
///
/// Only network-level failures become errors here; interpreting the status
/// is left to the caller.
#[derive(Clone)]
pub struct OpenApiHttpClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl OpenApiHttpClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new_with_client(base_url, client))
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Sending {} request to {}", method, url);

        let mut request = self.client.request(method, &url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request to Open API: {}", e);
            Error::OpenApiFailed(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read Open API response body: {}", e);
            Error::OpenApiFailed(e.to_string())
        })?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }

    pub async fn post(&self, path: &str, headers: HeaderMap, body: Vec<u8>) -> Result<HttpResponse> {
        self.send(Method::POST, path, headers, &[], Some(body)).await
    }

    pub async fn get(
        &self,
        path: &str,
        headers: HeaderMap,
        query: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        self.send(Method::GET, path, headers, query, None).await
    }
}
