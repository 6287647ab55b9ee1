//! What happens to an existing child profile when step 2 is submitted again.

use serde::Deserialize;

/// Resubmission policy for step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResubmissionPolicy {
    /// Add another child profile next to any existing one.
    #[default]
    Append,
    /// Replace the signup's child profile and feature preferences.
    Replace,
}
