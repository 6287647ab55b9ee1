//! PostgreSQL connection settings for the signup store.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

const URL_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];
const POOL_CEILING: u32 = 100;

/// Connection pool settings.
///
/// Only read when the Postgres backend is selected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds a request waits for a free connection.
    pub acquire_timeout_secs: u64,
    /// Seconds an idle connection is kept open. `0` keeps it indefinitely.
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        // Signup traffic is bursty but small.
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 300,
        }
    }
}

impl DatabaseConfig {
    /// Pool options built from these settings; the caller supplies the URL
    /// on connect.
    pub fn pool_options(&self) -> PgPoolOptions {
        let idle = (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs));

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(idle)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !URL_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > POOL_CEILING {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn pool_options_carry_configured_limits() {
        let options = DatabaseConfig {
            max_connections: 4,
            min_connections: 2,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 60,
            ..Default::default()
        }
        .pool_options();

        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 2);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn zero_idle_timeout_keeps_connections() {
        let options = DatabaseConfig {
            idle_timeout_secs: 0,
            ..Default::default()
        }
        .pool_options();

        assert_eq!(options.get_idle_timeout(), None);
    }

    #[test]
    fn url_is_required() {
        assert_eq!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        );
    }

    #[test]
    fn both_postgres_schemes_are_accepted() {
        assert!(with_url("postgres://localhost/kaid").validate().is_ok());
        assert!(with_url("postgresql://u:p@localhost:5432/kaid").validate().is_ok());
        assert_eq!(
            with_url("mysql://localhost/kaid").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn pool_bounds_are_checked() {
        let cases = [
            (0, 0, ValidationError::InvalidPoolSize),
            (5, 6, ValidationError::InvalidPoolSize),
            (150, 1, ValidationError::PoolSizeTooLarge),
        ];

        for (max, min, expected) in cases {
            let config = DatabaseConfig {
                max_connections: max,
                min_connections: min,
                ..with_url("postgres://localhost/kaid")
            };
            assert_eq!(config.validate(), Err(expected), "max={} min={}", max, min);
        }
    }
}
