use super::TokenService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockTokenClient {
    token: String,
    fail_issue: Arc<Mutex<bool>>,
    fail_disable: Arc<Mutex<bool>>,
    issue_count: Arc<Mutex<usize>>,
    disabled: Arc<Mutex<Vec<(String, String, i64)>>>,
}

impl MockTokenClient {
    pub fn new() -> Self {
        Self {
            token: "t-mock-token".to_string(),
            fail_issue: Arc::new(Mutex::new(false)),
            fail_disable: Arc::new(Mutex::new(false)),
            issue_count: Arc::new(Mutex::new(0)),
            disabled: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = token;
        self
    }

    pub fn with_issue_failure(self, should_fail: bool) -> Self {
        *self.fail_issue.lock().unwrap() = should_fail;
        self
    }

    pub fn with_disable_failure(self, should_fail: bool) -> Self {
        *self.fail_disable.lock().unwrap() = should_fail;
        self
    }

    pub fn get_issue_count(&self) -> usize {
        *self.issue_count.lock().unwrap()
    }

    /// `(app_id, tenant_key, code)` for every invalidation request received.
    pub fn get_disabled(&self) -> Vec<(String, String, i64)> {
        self.disabled.lock().unwrap().clone()
    }
}

impl Default for MockTokenClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenService for MockTokenClient {
    async fn tenant_access_token(&self, tenant_key: &str, app_id: &str) -> Result<String> {
        *self.issue_count.lock().unwrap() += 1;

        if *self.fail_issue.lock().unwrap() {
            return Err(Error::Token(format!(
                "mock token failure for tenant[{}] app[{}]",
                tenant_key, app_id
            )));
        }
        Ok(self.token.clone())
    }

    async fn disable_tenant_token(
        &self,
        app_id: &str,
        tenant_key: &str,
        code: i64,
    ) -> Result<()> {
        self.disabled
            .lock()
            .unwrap()
            .push((app_id.to_string(), tenant_key.to_string(), code));

        if *self.fail_disable.lock().unwrap() {
            return Err(Error::Token("mock disable failure".to_string()));
        }
        Ok(())
    }
}
