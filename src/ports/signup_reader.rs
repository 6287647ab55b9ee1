//! Signup reader port (read side).
//!
//! Queries over the `CompleteSignup` projection, used by the admin
//! surface and the stats aggregation.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SignupId};
use crate::domain::waitlist::{CompleteSignup, EmailAddress};

/// Reader port for the joined signup view.
#[async_trait]
pub trait SignupReader: Send + Sync {
    /// Every signup, newest first.
    async fn list_all(&self) -> Result<Vec<CompleteSignup>, DomainError>;

    /// Get one signup by id. Returns `None` if not found.
    async fn get_by_id(&self, id: &SignupId) -> Result<Option<CompleteSignup>, DomainError>;

    /// Get one signup by normalised email. Returns `None` if not found.
    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CompleteSignup>, DomainError>;
}
