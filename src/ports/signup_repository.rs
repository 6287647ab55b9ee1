//! Signup repository port (write side).
//!
//! Defines the contract for persisting signups and their step-2 profile
//! data. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Email-keyed**: lookups use the normalised `EmailAddress`
//! - **Atomic step 2**: marker, child profile and feature rows are written
//!   in one unit; only the feature rows may fail independently

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SignupId};
use crate::domain::waitlist::{
    ChildProfile, EmailAddress, FeatureLabel, Provenance, ResubmissionPolicy, Signup,
};

/// Everything step 2 writes for one signup.
#[derive(Debug, Clone)]
pub struct ProfileCompletion {
    pub signup_id: SignupId,
    pub profile: ChildProfile,
    pub features: Vec<FeatureLabel>,
    pub policy: ResubmissionPolicy,
}

/// Fate of the feature-preference rows of a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureWrite {
    /// No features were selected.
    Skipped,
    /// All rows were written.
    Persisted(usize),
    /// The rows were rolled back; the rest of the completion stands.
    Failed(String),
}

/// Repository port for signup persistence.
#[async_trait]
pub trait SignupRepository: Send + Sync {
    /// Find a signup by its normalised email.
    ///
    /// Returns `None` if not found.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Signup>, DomainError>;

    /// Insert a new step-1 signup.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if another signup already holds the email
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, signup: &Signup) -> Result<(), DomainError>;

    /// Overwrite parent name and provenance of an existing signup.
    ///
    /// # Errors
    ///
    /// - `SignupNotFound` if the signup doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn refresh_identity(
        &self,
        id: &SignupId,
        parent_name: &str,
        provenance: &Provenance,
    ) -> Result<(), DomainError>;

    /// Mark step 2 complete and store the child profile and features.
    ///
    /// The marker update and profile insert succeed or fail together.
    /// A failure writing the feature rows is reported through
    /// [`FeatureWrite::Failed`] instead of an error.
    ///
    /// # Errors
    ///
    /// - `SignupNotFound` if the signup doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn complete_profile(
        &self,
        completion: &ProfileCompletion,
    ) -> Result<FeatureWrite, DomainError>;
}
