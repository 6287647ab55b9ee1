//! Child profile captured by step 2 of the signup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ChildProfileId, SignupId, Timestamp, ValidationError};

/// Youngest age accepted for a child profile.
pub const MIN_CHILD_AGE: u8 = 0;

/// Oldest age accepted for a child profile.
pub const MAX_CHILD_AGE: u8 = 15;

/// Age as it arrives from a client, before coercion.
///
/// Forms post either a JSON number or the raw text of an input box.
#[derive(Debug, Clone, PartialEq)]
pub enum AgeInput {
    Number(f64),
    Text(String),
}

/// A child's age in whole years, always within `0..=15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ChildAge(u8);

impl ChildAge {
    /// Creates an age, rejecting values outside the accepted range.
    pub fn new(years: i64) -> Result<Self, ValidationError> {
        if years < i64::from(MIN_CHILD_AGE) || years > i64::from(MAX_CHILD_AGE) {
            return Err(ValidationError::out_of_range(
                "childAge",
                i64::from(MIN_CHILD_AGE),
                i64::from(MAX_CHILD_AGE),
                years,
            ));
        }
        Ok(Self(years as u8))
    }

    /// Coerces client input to an age.
    ///
    /// Numbers are truncated toward zero. Text contributes its leading
    /// integer (`"7 years"` is 7); text without one is rejected.
    pub fn coerce(input: &AgeInput) -> Result<Self, ValidationError> {
        let years = match input {
            AgeInput::Number(n) if n.is_finite() => n.trunc() as i64,
            AgeInput::Number(_) => {
                return Err(ValidationError::invalid_format("childAge", "not a number"))
            }
            AgeInput::Text(text) => leading_integer(text)
                .ok_or_else(|| ValidationError::invalid_format("childAge", "not a number"))?,
        };
        Self::new(years)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ChildAge {
    type Error = ValidationError;

    fn try_from(years: i64) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<ChildAge> for u8 {
    fn from(age: ChildAge) -> Self {
        age.0
    }
}

impl fmt::Display for ChildAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurd inputs; they are rejected by the range check anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

/// Free-text label of a product feature a parent is interested in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureLabel(String);

impl FeatureLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Profile of the child a signup was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: ChildProfileId,
    pub signup_id: SignupId,
    pub child_name: String,
    pub child_age: ChildAge,
    pub child_interests: Option<String>,
    pub suggestions: Option<String>,
    pub created_at: Timestamp,
}

impl ChildProfile {
    pub fn new(
        signup_id: SignupId,
        child_name: String,
        child_age: ChildAge,
        child_interests: Option<String>,
        suggestions: Option<String>,
    ) -> Self {
        Self {
            id: ChildProfileId::new(),
            signup_id,
            child_name,
            child_age,
            child_interests: non_blank(child_interests),
            suggestions: non_blank(suggestions),
            created_at: Timestamp::now(),
        }
    }
}

/// Empty optional text is stored as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_range_boundaries() {
        assert_eq!(ChildAge::new(0).unwrap().value(), 0);
        assert_eq!(ChildAge::new(15).unwrap().value(), 15);
    }

    #[test]
    fn rejects_values_just_outside_range() {
        assert!(matches!(
            ChildAge::new(-1),
            Err(ValidationError::OutOfRange { actual: -1, .. })
        ));
        assert!(matches!(
            ChildAge::new(16),
            Err(ValidationError::OutOfRange { actual: 16, .. })
        ));
    }

    #[test]
    fn coerces_numeric_text() {
        let age = ChildAge::coerce(&AgeInput::Text("7".to_string())).unwrap();
        assert_eq!(age.value(), 7);

        let age = ChildAge::coerce(&AgeInput::Text(" 12 years".to_string())).unwrap();
        assert_eq!(age.value(), 12);
    }

    #[test]
    fn truncates_fractional_numbers() {
        let age = ChildAge::coerce(&AgeInput::Number(5.9)).unwrap();
        assert_eq!(age.value(), 5);
    }

    #[test]
    fn rejects_non_numeric_text() {
        for raw in ["", "seven", "abc12", "-"] {
            assert!(
                matches!(
                    ChildAge::coerce(&AgeInput::Text(raw.to_string())),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_negative_text() {
        assert!(ChildAge::coerce(&AgeInput::Text("-1".to_string())).is_err());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(ChildAge::coerce(&AgeInput::Number(f64::NAN)).is_err());
        assert!(ChildAge::coerce(&AgeInput::Number(f64::INFINITY)).is_err());
    }

    #[test]
    fn age_deserialization_enforces_range() {
        assert!(serde_json::from_str::<ChildAge>("9").is_ok());
        assert!(serde_json::from_str::<ChildAge>("42").is_err());
    }

    #[test]
    fn profile_drops_empty_optional_text() {
        let profile = ChildProfile::new(
            SignupId::new(),
            "Mia".to_string(),
            ChildAge::new(6).unwrap(),
            Some(String::new()),
            Some("More dinosaurs".to_string()),
        );
        assert_eq!(profile.child_interests, None);
        assert_eq!(profile.suggestions.as_deref(), Some("More dinosaurs"));
    }

    proptest! {
        #[test]
        fn age_is_accepted_iff_in_range(years in -1_000i64..1_000) {
            let accepted = ChildAge::new(years).is_ok();
            prop_assert_eq!(accepted, (0..=15).contains(&years));
        }

        #[test]
        fn text_and_number_inputs_agree(years in -50i64..50) {
            let from_text = ChildAge::coerce(&AgeInput::Text(years.to_string())).ok();
            let from_number = ChildAge::coerce(&AgeInput::Number(years as f64)).ok();
            prop_assert_eq!(from_text, from_number);
        }
    }
}
