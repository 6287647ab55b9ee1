//! SubmitStep2Handler - Command handler for the profile step of a signup.

use std::sync::Arc;

use crate::domain::foundation::SignupId;
use crate::domain::waitlist::{
    require_text, AgeInput, ChildAge, ChildProfile, EmailAddress, FeatureLabel,
    ResubmissionPolicy, WaitlistError,
};
use crate::ports::{FeatureWrite, ProfileCompletion, SignupRepository};

const REQUIRED_MESSAGE: &str = "Email, child name, and age are required";
const AGE_RANGE_MESSAGE: &str = "Child age must be between 0-15 years";
const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Command to complete a signup with the child's profile.
#[derive(Debug, Clone, Default)]
pub struct SubmitStep2Command {
    pub email: String,
    pub child_name: String,
    pub child_age: Option<AgeInput>,
    pub child_interests: Option<String>,
    pub selected_features: Vec<String>,
    pub suggestions: Option<String>,
}

/// Result of a successful step 2.
#[derive(Debug, Clone)]
pub struct SubmitStep2Result {
    pub signup_id: SignupId,
    pub email: EmailAddress,
    pub child_name: String,
    pub child_age: ChildAge,
    /// Number of features submitted, whether or not they were stored.
    pub features_selected: usize,
}

/// Handler for step 2. Never creates a signup.
pub struct SubmitStep2Handler {
    repository: Arc<dyn SignupRepository>,
    policy: ResubmissionPolicy,
}

impl SubmitStep2Handler {
    pub fn new(repository: Arc<dyn SignupRepository>, policy: ResubmissionPolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(&self, cmd: SubmitStep2Command) -> Result<SubmitStep2Result, WaitlistError> {
        // 1. Validate before touching storage
        if cmd.email.is_empty() {
            return Err(WaitlistError::validation("email", REQUIRED_MESSAGE));
        }
        let child_name = require_text("childName", cmd.child_name)
            .map_err(|_| WaitlistError::validation("childName", REQUIRED_MESSAGE))?;
        let age_input = cmd
            .child_age
            .ok_or_else(|| WaitlistError::validation("childAge", REQUIRED_MESSAGE))?;
        let child_age = ChildAge::coerce(&age_input)
            .map_err(|_| WaitlistError::validation("childAge", AGE_RANGE_MESSAGE))?;
        let email = EmailAddress::parse(&cmd.email)
            .map_err(|_| WaitlistError::validation("email", INVALID_EMAIL_MESSAGE))?;

        // 2. Step 1 must have happened
        let signup = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(WaitlistError::PrecursorMissing)?;
        let signup_id = *signup.id();

        // 3. Marker, profile and features in one write
        let features: Vec<FeatureLabel> = cmd
            .selected_features
            .into_iter()
            .map(FeatureLabel::new)
            .collect();
        let features_selected = features.len();

        let completion = ProfileCompletion {
            signup_id,
            profile: ChildProfile::new(
                signup_id,
                child_name.clone(),
                child_age,
                cmd.child_interests,
                cmd.suggestions,
            ),
            features,
            policy: self.policy,
        };

        match self.repository.complete_profile(&completion).await? {
            FeatureWrite::Failed(reason) => {
                tracing::warn!(
                    signup_id = %signup_id,
                    features = features_selected,
                    "Feature preferences not saved: {}",
                    reason
                );
            }
            FeatureWrite::Persisted(count) => {
                tracing::debug!(signup_id = %signup_id, count, "Feature preferences saved");
            }
            FeatureWrite::Skipped => {}
        }
        tracing::info!(signup_id = %signup_id, "Step 2 completed signup");

        Ok(SubmitStep2Result {
            signup_id,
            email,
            child_name,
            child_age,
            features_selected,
        })
    }
}
