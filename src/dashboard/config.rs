use crate::core::{DashboardError, Result};
use crate::query::DEFAULT_PAGE_SIZE;

/// Dashboard configuration
///
/// Controls the page size of listings and the backend keys the two
/// collections are stored under.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Entities per page in user and role listings
    pub page_size: usize,

    /// Backend key of the persisted user collection
    pub users_key: String,

    /// Backend key of the persisted role collection
    pub roles_key: String,
}

impl DashboardConfig {
    /// Create a configuration with the default page size and keys
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            users_key: "users".to_string(),
            roles_key: "roles".to_string(),
        }
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the user collection key
    pub fn users_key(mut self, key: &str) -> Self {
        self.users_key = key.to_string();
        self
    }

    /// Set the role collection key
    pub fn roles_key(mut self, key: &str) -> Self {
        self.roles_key = key.to_string();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DashboardError::Config(
                "page_size must be > 0".to_string(),
            ));
        }

        if self.users_key.is_empty() {
            return Err(DashboardError::Config(
                "users_key cannot be empty".to_string(),
            ));
        }

        if self.roles_key.is_empty() {
            return Err(DashboardError::Config(
                "roles_key cannot be empty".to_string(),
            ));
        }

        if self.users_key == self.roles_key {
            return Err(DashboardError::Config(
                "users_key and roles_key must differ".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new()
    }
}
