//! Email address value object.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// `local@domain.tld`, no whitespace and a single `@` on each side of the dot.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// A syntactically valid, lower-cased email address.
///
/// Every read or write keyed by email goes through this type, so two
/// spellings that differ only in case always resolve to the same signup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates the shape of `raw` and folds it to lowercase.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !EMAIL_SHAPE.is_match(raw) {
            return Err(ValidationError::invalid_format(
                "email",
                "expected local@domain.tld",
            ));
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Rehydrates an address already normalised by storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_lowercases_address() {
        let email = EmailAddress::parse("Parent.Name@Example.COM").unwrap();
        assert_eq!(email.as_str(), "parent.name@example.com");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(
            EmailAddress::parse(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn parse_rejects_malformed_shapes() {
        for raw in [
            "plainaddress",
            "missing-domain@",
            "@missing-local.com",
            "no-tld@example",
            "two@@example.com",
            "space in@example.com",
            " leading@example.com",
        ] {
            assert!(
                matches!(
                    EmailAddress::parse(raw),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn parse_accepts_subdomains_and_plus_tags() {
        assert!(EmailAddress::parse("kid+waitlist@mail.example.co.uk").is_ok());
    }

    proptest! {
        #[test]
        fn normalised_addresses_are_case_insensitive(
            local in "[a-zA-Z0-9]{1,12}",
            domain in "[a-zA-Z]{1,12}",
            tld in "[a-zA-Z]{2,6}",
        ) {
            let raw = format!("{local}@{domain}.{tld}");
            let upper = EmailAddress::parse(&raw.to_uppercase()).unwrap();
            let lower = EmailAddress::parse(&raw.to_lowercase()).unwrap();
            prop_assert_eq!(upper, lower);
        }
    }
}
