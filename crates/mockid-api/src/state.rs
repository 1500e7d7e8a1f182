//! # Application State
//!
//! [`AppState`] is handed to every handler. It owns the identity store
//! behind a trait object so tests and alternative backends can inject their
//! own implementation, and the deployment [`AppConfig`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use mockid_core::EnvelopeRules;
use thiserror::Error;

use crate::store::{IdentityStore, InMemoryIdentityStore};

/// Invalid deployment configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("context path must start with '/', got {0:?}")]
    ContextPath(String),
}

/// Deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Prefix the identity routes are mounted under, e.g.
    /// `/v1/mock-identity-system`. Empty mounts them at the root.
    pub context_path: String,
    /// Allowed skew between `requestTime` and the server clock.
    pub request_time_tolerance: Option<chrono::Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8082,
            context_path: String::new(),
            request_time_tolerance: None,
        }
    }
}

impl AppConfig {
    /// Set the context path, normalizing a trailing slash away.
    ///
    /// `""` and `"/"` both mean "mount at the root".
    pub fn with_context_path(mut self, raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "/" {
            self.context_path = String::new();
            return Ok(self);
        }
        if !trimmed.starts_with('/') {
            return Err(ConfigError::ContextPath(raw.to_string()));
        }
        self.context_path = trimmed.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn envelope_rules(&self) -> EnvelopeRules {
        EnvelopeRules {
            request_time_tolerance: self.request_time_tolerance,
        }
    }
}

/// Shared state passed to all route handlers.
///
/// Cheap to clone: all clones share the same store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IdentityStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Default configuration over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryIdentityStore::new()))
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn IdentityStore>) -> Self {
        Self { store, config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_listens_on_8082() {
        let config = AppConfig::default();
        assert_eq!(config.socket_addr().port(), 8082);
        assert!(config.context_path.is_empty());
        assert_eq!(config.envelope_rules(), EnvelopeRules::default());
    }

    #[test]
    fn context_path_is_normalized() {
        let config = AppConfig::default()
            .with_context_path("/v1/mock-identity-system/")
            .unwrap();
        assert_eq!(config.context_path, "/v1/mock-identity-system");

        let root = AppConfig::default().with_context_path("/").unwrap();
        assert!(root.context_path.is_empty());
    }

    #[test]
    fn context_path_without_leading_slash_is_rejected() {
        let err = AppConfig::default()
            .with_context_path("v1/mock")
            .unwrap_err();
        assert_eq!(err, ConfigError::ContextPath("v1/mock".into()));
    }

    #[test]
    fn tolerance_flows_into_envelope_rules() {
        let config = AppConfig {
            request_time_tolerance: Some(chrono::Duration::seconds(30)),
            ..AppConfig::default()
        };
        assert_eq!(
            config.envelope_rules().request_time_tolerance,
            Some(chrono::Duration::seconds(30))
        );
    }
}
