//! CompleteSignup - read-only projection joining a signup with its child
//! profile and feature preferences.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SignupId, Timestamp};

use super::{ChildAge, EmailAddress, SignupStep};

/// One row of the `complete_signups` view.
///
/// Profile fields are absent until step 2 succeeds. Field names follow the
/// storage columns so dashboards can consume rows unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteSignup {
    pub id: SignupId,
    pub parent_name: String,
    pub email: EmailAddress,
    pub created_at: Timestamp,
    pub step_completed: SignupStep,
    pub child_name: Option<String>,
    pub child_age: Option<ChildAge>,
    pub child_interests: Option<String>,
    pub suggestions: Option<String>,
    #[serde(default)]
    pub selected_features: Vec<String>,
}

impl CompleteSignup {
    pub fn is_completed(&self) -> bool {
        self.step_completed.is_completed()
    }
}
