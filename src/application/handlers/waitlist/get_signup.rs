//! GetSignupHandler - Query handler for a single signup.

use std::sync::Arc;

use crate::domain::foundation::SignupId;
use crate::domain::waitlist::{CompleteSignup, EmailAddress, WaitlistError};
use crate::ports::SignupReader;

/// How to find the signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupLookup {
    ByEmail(String),
    ById(String),
}

/// Query to get one signup from the joined view.
#[derive(Debug, Clone)]
pub struct GetSignupQuery {
    pub lookup: SignupLookup,
}

/// Result type for the single-signup query.
pub type GetSignupResult = CompleteSignup;

pub struct GetSignupHandler {
    reader: Arc<dyn SignupReader>,
}

impl GetSignupHandler {
    pub fn new(reader: Arc<dyn SignupReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetSignupQuery) -> Result<GetSignupResult, WaitlistError> {
        let found = match query.lookup {
            SignupLookup::ByEmail(raw) => {
                let email = EmailAddress::parse(&raw)?;
                self.reader.get_by_email(&email).await?
            }
            SignupLookup::ById(raw) => {
                let id = SignupId::parse("id", &raw)?;
                self.reader.get_by_id(&id).await?
            }
        };

        found.ok_or(WaitlistError::NotFound)
    }
}
