//! Tenant access token issuance
//!
//! Image calls authenticate with a short-lived tenant access token. The
//! issuing subsystem lives outside this crate; this module defines the seam
//! it plugs into plus a static and a mock implementation.

pub mod mock;
pub mod static_token;

pub use mock::MockTokenClient;
pub use static_token::StaticTokenClient;

use crate::Result;
use async_trait::async_trait;

/// Open API codes reporting an invalid or expired access token.
pub const TOKEN_INVALID_CODES: [i64; 2] = [99991663, 99991664];

pub fn is_token_invalid_code(code: i64) -> bool {
    TOKEN_INVALID_CODES.contains(&code)
}

#[async_trait]
pub trait TokenService: Send + Sync {
    async fn tenant_access_token(&self, tenant_key: &str, app_id: &str) -> Result<String>;

    /// Best-effort invalidation after the platform rejected a request with `code`.
    async fn disable_tenant_token(&self, app_id: &str, tenant_key: &str, code: i64)
        -> Result<()>;
}
