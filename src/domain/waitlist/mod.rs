//! Waitlist module - the two-step signup funnel.
//!
//! # Lifecycle
//!
//! ```text
//! step 1 (parent name + email) ──► IdentityCaptured ──► step 2 (child profile) ──► ProfileCompleted
//!          ▲            │                                        │
//!          └─ repeat ───┘ refresh in place                       └─ repeat: re-confirm, add/replace profile
//! ```
//!
//! Signups are keyed by lower-cased email and never deleted here.

mod child;
pub(crate) mod complete_signup;
mod email;
mod errors;
mod export;
mod filter;
mod policy;
mod signup;

pub use child::{
    AgeInput, ChildAge, ChildProfile, FeatureLabel, MAX_CHILD_AGE, MIN_CHILD_AGE,
};
pub use complete_signup::CompleteSignup;
pub use email::EmailAddress;
pub use errors::WaitlistError;
pub use export::{render_csv, CsvExport};
pub use filter::{SignupFilter, StatusFilter};
pub use policy::ResubmissionPolicy;
pub use signup::{require_text, Provenance, Signup, SignupStep, DEFAULT_SOURCE_TAG};
