//! Session stub for the login screen.
//!
//! There is no real credential verification. The authenticator accepts any
//! non-empty email/password pair, waits a fixed simulated network delay,
//! and fabricates an administrator identity. The identity is persisted so
//! a restarted process can restore the session.

use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{DashboardError, EntityId, Result};
use crate::persist::KeyValueBackend;

/// Backend key the signed-in identity is stored under.
pub const CURRENT_USER_KEY: &str = "currentUser";

const DEFAULT_LOGIN_DELAY: Duration = Duration::from_secs(1);

/// The signed-in identity fabricated by [`MockAuthenticator::login`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Stub authenticator backed by a key-value store.
pub struct MockAuthenticator {
    backend: Arc<dyn KeyValueBackend>,
    delay: Duration,
}

impl MockAuthenticator {
    /// New authenticator with the default one second login delay.
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self::with_delay(backend, DEFAULT_LOGIN_DELAY)
    }

    /// New authenticator with an explicit login delay. Tests pass
    /// `Duration::ZERO`.
    pub fn with_delay(backend: impl KeyValueBackend + 'static, delay: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            delay,
        }
    }

    /// Accepts any non-empty credential pair and returns a fabricated
    /// administrator identity carrying the given email.
    ///
    /// The identity is persisted best-effort: a storage failure is logged
    /// and the login still succeeds.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        if email.is_empty() {
            return Err(DashboardError::InvalidCredentials(
                "Email must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(DashboardError::InvalidCredentials(
                "Password must not be empty".to_string(),
            ));
        }

        tokio::time::sleep(self.delay).await;

        let identity = Identity {
            id: 1,
            name: "Admin User".to_string(),
            email: email.to_string(),
            role: "Admin".to_string(),
        };

        match serde_json::to_string_pretty(&identity) {
            Ok(payload) => {
                if let Err(err) = self.backend.write(CURRENT_USER_KEY, &payload).await {
                    warn!("Failed to persist signed-in identity: {}", err);
                }
            }
            Err(err) => warn!("Failed to encode signed-in identity: {}", err),
        }

        Ok(identity)
    }

    /// Removes the stored identity. Best-effort: failures are logged.
    pub async fn logout(&self) {
        if let Err(err) = self.backend.remove(CURRENT_USER_KEY).await {
            warn!("Failed to clear signed-in identity: {}", err);
        }
    }

    /// Restores the stored identity, if a readable one exists.
    pub async fn current_user(&self) -> Option<Identity> {
        let payload = match self.backend.read(CURRENT_USER_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                warn!("Failed to read signed-in identity: {}", err);
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(identity) => Some(identity),
            Err(err) => {
                warn!("Discarding malformed signed-in identity: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryBackend;

    fn authenticator(backend: MemoryBackend) -> MockAuthenticator {
        MockAuthenticator::with_delay(backend, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_rejects_empty_credentials() {
        let auth = authenticator(MemoryBackend::new());

        assert!(matches!(
            auth.login("", "secret").await,
            Err(DashboardError::InvalidCredentials(_))
        ));
        assert!(matches!(
            auth.login("admin@example.com", "").await,
            Err(DashboardError::InvalidCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_login_fabricates_admin_identity() {
        let auth = authenticator(MemoryBackend::new());
        let identity = auth.login("admin@example.com", "secret").await.unwrap();

        assert_eq!(identity.id, 1);
        assert_eq!(identity.name, "Admin User");
        assert_eq!(identity.email, "admin@example.com");
        assert_eq!(identity.role, "Admin");
    }

    #[tokio::test]
    async fn test_login_persists_and_current_user_restores() {
        let backend = MemoryBackend::new();
        let auth = authenticator(backend.clone());

        assert_eq!(auth.current_user().await, None);
        let identity = auth.login("admin@example.com", "secret").await.unwrap();
        assert_eq!(auth.current_user().await, Some(identity.clone()));

        // A second authenticator over the same backend sees the session.
        let other = authenticator(backend);
        assert_eq!(other.current_user().await, Some(identity));
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let auth = authenticator(MemoryBackend::new());
        auth.login("admin@example.com", "secret").await.unwrap();
        auth.logout().await;
        assert_eq!(auth.current_user().await, None);
    }

    #[tokio::test]
    async fn test_malformed_stored_identity_is_none() {
        let backend = MemoryBackend::new();
        backend.write(CURRENT_USER_KEY, "not json").await.unwrap();

        let auth = authenticator(backend);
        assert_eq!(auth.current_user().await, None);
    }
}
