//! SubmitStep1Handler - Command handler for the identity step of a signup.

use std::net::IpAddr;
use std::sync::Arc;

use crate::domain::foundation::SignupId;
use crate::domain::waitlist::{require_text, EmailAddress, Provenance, Signup, WaitlistError};
use crate::ports::SignupRepository;

const REQUIRED_MESSAGE: &str = "Parent name and email are required";
const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Command to capture a parent's identity.
#[derive(Debug, Clone, Default)]
pub struct SubmitStep1Command {
    pub parent_name: String,
    pub email: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<IpAddr>,
}

/// What step 1 did with the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step1Outcome {
    /// First visit: a new signup was inserted.
    Created,
    /// Returning visitor who hasn't finished: name and client details refreshed.
    Refreshed,
    /// Returning visitor who already finished step 2: nothing changed.
    AlreadyCompleted,
}

/// Result of a successful step 1.
#[derive(Debug, Clone)]
pub struct SubmitStep1Result {
    pub signup_id: SignupId,
    pub parent_name: String,
    pub email: EmailAddress,
    pub outcome: Step1Outcome,
}

impl SubmitStep1Result {
    pub fn already_completed(&self) -> bool {
        self.outcome == Step1Outcome::AlreadyCompleted
    }
}

/// Handler for step 1. At most one signup exists per email.
pub struct SubmitStep1Handler {
    repository: Arc<dyn SignupRepository>,
    source_tag: String,
}

impl SubmitStep1Handler {
    pub fn new(repository: Arc<dyn SignupRepository>, source_tag: impl Into<String>) -> Self {
        Self {
            repository,
            source_tag: source_tag.into(),
        }
    }

    pub async fn handle(&self, cmd: SubmitStep1Command) -> Result<SubmitStep1Result, WaitlistError> {
        // 1. Validate before touching storage
        let parent_name = require_text("parentName", cmd.parent_name)
            .map_err(|_| WaitlistError::validation("parentName", REQUIRED_MESSAGE))?;
        if cmd.email.is_empty() {
            return Err(WaitlistError::validation("email", REQUIRED_MESSAGE));
        }
        let email = EmailAddress::parse(&cmd.email)
            .map_err(|_| WaitlistError::validation("email", INVALID_EMAIL_MESSAGE))?;

        let provenance = Provenance::new(&self.source_tag, cmd.user_agent, cmd.ip_address);

        // 2. Resolve returning visitor vs new signup
        let (signup_id, outcome) = match self.repository.find_by_email(&email).await? {
            Some(existing) if existing.is_completed() => {
                tracing::info!(signup_id = %existing.id(), "Step 1 revisited after completion");
                (*existing.id(), Step1Outcome::AlreadyCompleted)
            }
            Some(mut existing) => {
                existing.refresh_identity(parent_name.clone(), provenance)?;
                self.repository
                    .refresh_identity(existing.id(), existing.parent_name(), existing.provenance())
                    .await?;
                tracing::info!(signup_id = %existing.id(), "Step 1 refreshed existing signup");
                (*existing.id(), Step1Outcome::Refreshed)
            }
            None => {
                let signup = Signup::start(parent_name.clone(), email.clone(), provenance)?;
                self.repository.insert(&signup).await?;
                tracing::info!(signup_id = %signup.id(), "Step 1 created signup");
                (*signup.id(), Step1Outcome::Created)
            }
        };

        Ok(SubmitStep1Result {
            signup_id,
            parent_name,
            email,
            outcome,
        })
    }
}
