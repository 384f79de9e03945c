//! Administrator credential check
//!
//! The service knows a single admin secret, and only as a bcrypt hash loaded
//! from configuration at startup. Neither the attempted password nor the
//! stored hash is ever written to the log.

use std::fmt;

use tracing::{error, info, warn};

use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::password::verify_password;

#[derive(Clone)]
pub struct AdminAuthenticator {
    password_hash: Option<String>,
}

impl AdminAuthenticator {
    pub fn new(password_hash: Option<String>) -> Self {
        Self {
            password_hash: password_hash.filter(|h| !h.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Check `password` against the configured hash.
    ///
    /// Returns `Configuration` without attempting a comparison when no hash
    /// is configured, `Unauthorized` on mismatch.
    pub fn authenticate(&self, password: &str) -> DomainResult<()> {
        let Some(hash) = self.password_hash.as_deref() else {
            error!("Admin password hash is not configured");
            return Err(DomainError::Configuration(
                "admin password hash is not configured".into(),
            ));
        };

        match verify_password(password, hash) {
            Ok(true) => {
                info!("Administrator authenticated");
                Ok(())
            }
            Ok(false) => {
                warn!("Administrator authentication failed");
                Err(DomainError::Unauthorized("Invalid credentials".into()))
            }
            // BcryptError::InvalidHash carries the hash text, so it is not logged
            Err(_) => {
                error!("Configured admin password hash is unusable");
                Err(DomainError::Configuration(
                    "admin password hash is invalid".into(),
                ))
            }
        }
    }
}

impl fmt::Debug for AdminAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuthenticator")
            .field("configured", &self.is_configured())
            .finish()
    }
}
