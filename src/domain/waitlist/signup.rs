//! Signup aggregate - the primary waitlist record keyed by email.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::domain::foundation::{SignupId, Timestamp, ValidationError};

use super::EmailAddress;

/// Provenance tag stamped on signups created from the marketing page.
pub const DEFAULT_SOURCE_TAG: &str = "landing_page";

/// How far a signup has progressed through the funnel.
///
/// Stored as the integer marker `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum SignupStep {
    /// Step 1 done: parent name and email captured.
    IdentityCaptured,
    /// Step 2 done: child profile captured.
    ProfileCompleted,
}

impl SignupStep {
    pub fn marker(&self) -> i16 {
        match self {
            SignupStep::IdentityCaptured => 1,
            SignupStep::ProfileCompleted => 2,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SignupStep::ProfileCompleted)
    }
}

impl TryFrom<i16> for SignupStep {
    type Error = ValidationError;

    fn try_from(marker: i16) -> Result<Self, Self::Error> {
        match marker {
            1 => Ok(SignupStep::IdentityCaptured),
            2 => Ok(SignupStep::ProfileCompleted),
            other => Err(ValidationError::out_of_range(
                "step_completed",
                1,
                2,
                i64::from(other),
            )),
        }
    }
}

impl From<SignupStep> for i16 {
    fn from(step: SignupStep) -> Self {
        step.marker()
    }
}

/// Where a signup came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Provenance {
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<IpAddr>,
}

impl Provenance {
    pub fn new(
        source: impl Into<String>,
        user_agent: Option<String>,
        ip_address: Option<IpAddr>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            user_agent: user_agent.filter(|ua| !ua.is_empty()),
            ip_address,
        }
    }
}

/// A waitlist signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    id: SignupId,
    parent_name: String,
    email: EmailAddress,
    step: SignupStep,
    provenance: Provenance,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Signup {
    /// Starts a new signup at step 1.
    pub fn start(
        parent_name: impl Into<String>,
        email: EmailAddress,
        provenance: Provenance,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: SignupId::new(),
            parent_name: require_text("parentName", parent_name.into())?,
            email,
            step: SignupStep::IdentityCaptured,
            provenance,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a signup from stored fields.
    pub fn reconstitute(
        id: SignupId,
        parent_name: String,
        email: EmailAddress,
        step: SignupStep,
        provenance: Provenance,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            parent_name,
            email,
            step,
            provenance,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &SignupId {
        &self.id
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_completed(&self) -> bool {
        self.step.is_completed()
    }

    /// Refreshes the parent name and client details of a returning visitor.
    ///
    /// The source tag recorded at creation is kept, as is any client detail
    /// the new request did not carry.
    pub fn refresh_identity(
        &mut self,
        parent_name: impl Into<String>,
        provenance: Provenance,
    ) -> Result<(), ValidationError> {
        self.parent_name = require_text("parentName", parent_name.into())?;
        self.provenance = Provenance {
            source: self.provenance.source.take(),
            user_agent: provenance.user_agent.or(self.provenance.user_agent.take()),
            ip_address: provenance.ip_address.or(self.provenance.ip_address),
        };
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks step 2 complete. Completing twice is a no-op on the marker.
    pub fn complete_profile(&mut self) {
        self.step = SignupStep::ProfileCompleted;
        self.updated_at = Timestamp::now();
    }
}

/// Trims `value` and rejects it when nothing is left.
pub fn require_text(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
