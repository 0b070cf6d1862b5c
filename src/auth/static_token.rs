use super::{is_token_invalid_code, TokenService};
use crate::{Error, Result};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Serves a single pre-issued tenant access token.
///
/// A token-invalid code passed to `disable_tenant_token` revokes the token;
/// later lookups fail until `set_token` installs a fresh one.
pub struct StaticTokenClient {
    token: RwLock<Option<String>>,
}

impl StaticTokenClient {
    pub fn new(token: String) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    pub fn set_token(&self, token: String) {
        *self.token.write() = Some(token);
    }
}

#[async_trait]
impl TokenService for StaticTokenClient {
    async fn tenant_access_token(&self, tenant_key: &str, app_id: &str) -> Result<String> {
        self.token.read().clone().ok_or_else(|| {
            Error::Token(format!(
                "no valid tenant access token for tenant[{}] app[{}]",
                tenant_key, app_id
            ))
        })
    }

    async fn disable_tenant_token(
        &self,
        app_id: &str,
        tenant_key: &str,
        code: i64,
    ) -> Result<()> {
        if !is_token_invalid_code(code) {
            return Ok(());
        }

        tracing::warn!(
            "Disabling tenant access token for tenant[{}] app[{}] after code {}",
            tenant_key,
            app_id,
            code
        );
        *self.token.write() = None;
        Ok(())
    }
}
