//! Persisted login session

use super::{KeyValueStore, StoreError};
use adafit_shared::{Session, User, UserUpdate};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Single-writer session store, same load/save discipline as the profile
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    session: Session,
}

impl SessionStore {
    pub fn open(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let session = Self::load(backend.as_ref(), &key);
        Self {
            backend,
            key,
            session,
        }
    }

    /// Read the persisted session; anything unusable means logged out.
    pub fn load(backend: &dyn KeyValueStore, key: &str) -> Session {
        match backend.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Discarding malformed session record");
                Session::anonymous()
            }),
            Ok(None) => Session::anonymous(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read session, treating as logged out");
                Session::anonymous()
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start a session for a synthetic user with a fresh id.
    pub fn login(&mut self, name: &str, email: &str) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
        };
        info!(user_id = %user.id, "User logged in");
        self.session = Session::authenticated(user.clone());
        self.save()?;
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.session = Session::anonymous();
        self.save()
    }

    /// Merge `update` into the current user; a no-op when logged out.
    pub fn update_user(&mut self, update: UserUpdate) -> Result<Option<&User>, StoreError> {
        let Some(user) = self.session.user_mut() else {
            return Ok(None);
        };
        user.apply(update);
        self.save()?;
        Ok(self.session.user())
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.session).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set(&self.key, &raw)
    }
}
