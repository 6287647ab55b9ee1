//! Waitlist behaviour configuration

use serde::Deserialize;

use crate::domain::waitlist::{ResubmissionPolicy, DEFAULT_SOURCE_TAG};

use super::error::ValidationError;

/// Which persistence gateway backs the service.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local storage; data is lost on restart.
    Memory,
}

/// Waitlist configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaitlistConfig {
    /// Persistence gateway
    pub storage: StorageBackend,

    /// Provenance source recorded on new signups
    pub source_tag: String,

    /// What a repeated step 2 does with earlier child profiles
    pub resubmission_policy: ResubmissionPolicy,

    /// Mount the read, stats and export routes
    pub admin_routes_enabled: bool,
}

impl WaitlistConfig {
    /// Whether a database connection is needed
    pub fn requires_database(&self) -> bool {
        self.storage == StorageBackend::Postgres
    }

    /// Validate waitlist configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source_tag.trim().is_empty() {
            return Err(ValidationError::EmptySourceTag);
        }
        Ok(())
    }
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
            resubmission_policy: ResubmissionPolicy::default(),
            admin_routes_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waitlist_config_defaults() {
        let config = WaitlistConfig::default();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.source_tag, "landing_page");
        assert_eq!(config.resubmission_policy, ResubmissionPolicy::Append);
        assert!(config.admin_routes_enabled);
        assert!(config.requires_database());
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config = WaitlistConfig {
            storage: StorageBackend::Memory,
            ..Default::default()
        };
        assert!(!config.requires_database());
    }

    #[test]
    fn test_validation_empty_source_tag() {
        let config = WaitlistConfig {
            source_tag: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptySourceTag));
    }
}
