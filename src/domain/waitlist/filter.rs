//! Admin-side filtering of the signup list.

use serde::Deserialize;

use super::CompleteSignup;

/// Which funnel stage to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

/// Search term plus status tab, as offered by the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFilter {
    search: Option<String>,
    status: StatusFilter,
}

impl SignupFilter {
    pub fn new(search: Option<String>, status: StatusFilter) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self { search, status }
    }

    /// Case-insensitive substring match over parent name, email and child name.
    pub fn matches(&self, signup: &CompleteSignup) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Completed => signup.is_completed(),
            StatusFilter::Incomplete => !signup.is_completed(),
        };
        if !status_ok {
            return false;
        }
        let Some(term) = &self.search else {
            return true;
        };
        [
            Some(signup.parent_name.as_str()),
            Some(signup.email.as_str()),
            signup.child_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term.as_str()))
    }

    /// Keeps matching rows, preserving order.
    pub fn apply(&self, signups: Vec<CompleteSignup>) -> Vec<CompleteSignup> {
        signups.into_iter().filter(|s| self.matches(s)).collect()
    }
}
