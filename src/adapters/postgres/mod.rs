//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSignupRepository` - Step 1 and step 2 writes
//! - `PostgresSignupReader` - Queries over the `complete_signups` view

mod signup_reader;
mod signup_repository;

pub use signup_reader::PostgresSignupReader;
pub use signup_repository::PostgresSignupRepository;
