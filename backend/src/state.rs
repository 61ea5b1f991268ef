//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::services::agent::{AgentClient, AgentError};
use crate::store::{FileStore, KeyValueStore, MemoryStore, ProfileStore, SessionStore};
use adafit_shared::WorkoutContext;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Shared application state
///
/// Every field is an `Arc` (or a cheap-to-clone client), so cloning per
/// request is O(1). Each store has a single writer at a time.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub profiles: Arc<Mutex<ProfileStore>>,
    pub sessions: Arc<Mutex<SessionStore>>,
    /// Most recent accepted check-in, re-used when the agent asks for a new plan
    pub last_checkin: Arc<Mutex<Option<WorkoutContext>>>,
    /// Present only when `agent.enabled` is set
    pub agent: Option<AgentClient>,
}

impl AppState {
    /// Build state over an explicit key-value backend.
    pub fn new(config: AppConfig, backend: Arc<dyn KeyValueStore>) -> Result<Self, AgentError> {
        let agent = if config.agent.enabled {
            Some(AgentClient::new(&config.agent)?)
        } else {
            None
        };
        let profiles = ProfileStore::open(backend.clone(), config.storage.profile_key.clone());
        let sessions = SessionStore::open(backend, config.storage.session_key.clone());

        Ok(Self {
            config: Arc::new(config),
            profiles: Arc::new(Mutex::new(profiles)),
            sessions: Arc::new(Mutex::new(sessions)),
            last_checkin: Arc::new(Mutex::new(None)),
            agent,
        })
    }

    /// Pick the backend from `storage.data_dir`: files when set, memory otherwise.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let backend: Arc<dyn KeyValueStore> = match &config.storage.data_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file-backed storage");
                Arc::new(FileStore::open(dir)?)
            }
            None => {
                info!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(config, backend)?)
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn agent(&self) -> Option<&AgentClient> {
        self.agent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_clone_shares_stores() {
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new())).unwrap();
        let cloned = state.clone();

        cloned.profiles.lock().await.complete_wizard().unwrap();
        assert!(state.profiles.lock().await.profile().completed_wizard);
    }

    #[tokio::test]
    async fn test_agent_only_when_enabled() {
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new())).unwrap();
        assert!(state.agent().is_none());

        let mut config = AppConfig::default();
        config.agent.enabled = true;
        let state = AppState::new(config, Arc::new(MemoryStore::new())).unwrap();
        assert!(state.agent().is_some());
    }

    #[tokio::test]
    async fn test_from_config_with_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        let state = AppState::from_config(config).unwrap();

        state.sessions.lock().await.login("Ada", "ada@example.com").unwrap();
        assert!(dir.path().join("adafit_auth.json").exists());
    }
}
