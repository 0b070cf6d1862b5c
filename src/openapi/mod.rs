//! Authenticated transport to the Lark Open API host

pub mod client;

pub use client::{HttpResponse, OpenApiHttpClient};

/// Formats the `Authorization` header value for a tenant access token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
