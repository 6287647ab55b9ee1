//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a waitlist signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupId(Uuid);

impl SignupId {
    /// Creates a new random SignupId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SignupId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parses a caller-supplied id, reporting failures against `field`.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        raw.trim()
            .parse()
            .map_err(|_| ValidationError::invalid_format(field, "not a valid signup id"))
    }
}

impl Default for SignupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SignupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SignupId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a child profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildProfileId(Uuid);

impl ChildProfileId {
    /// Creates a new random ChildProfileId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ChildProfileId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChildProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChildProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_id_generates_unique_values() {
        let id1 = SignupId::new();
        let id2 = SignupId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn signup_id_parses_from_string() {
        let id = SignupId::new();
        let parsed: SignupId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn signup_id_parse_reports_field_on_garbage() {
        let err = SignupId::parse("id", "not-a-uuid").unwrap_err();
        assert_eq!(err.field(), "id");
    }

    #[test]
    fn signup_id_serializes_as_plain_string() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&SignupId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn child_profile_id_wraps_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(ChildProfileId::from_uuid(uuid).as_uuid(), &uuid);
    }
}
