//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum REST API
//! - `postgres` - PostgreSQL persistence gateway
//! - `memory` - In-process persistence gateway (development and tests)

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryWaitlist;
pub use postgres::{PostgresSignupReader, PostgresSignupRepository};
