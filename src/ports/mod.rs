//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the persistence gateway. Adapters implement these ports.
//!
//! - `SignupRepository` - writes for the two signup steps
//! - `SignupReader` - queries over the `CompleteSignup` view

mod signup_reader;
mod signup_repository;

pub use signup_reader::SignupReader;
pub use signup_repository::{FeatureWrite, ProfileCompletion, SignupRepository};
