//! Waitlist handlers.
//!
//! ## Commands
//! - Step 1: capture parent identity
//! - Step 2: attach the child profile and feature preferences
//!
//! ## Queries
//! - Get one signup by email or id
//! - List signups (admin)
//! - Export signups as CSV (admin)

mod export_signups;
mod get_signup;
mod list_signups;
mod submit_step1;
mod submit_step2;

// Commands
pub use submit_step1::{Step1Outcome, SubmitStep1Command, SubmitStep1Handler, SubmitStep1Result};
pub use submit_step2::{SubmitStep2Command, SubmitStep2Handler, SubmitStep2Result};

// Queries
pub use export_signups::{ExportSignupsHandler, ExportSignupsQuery, ExportSignupsResult};
pub use get_signup::{GetSignupHandler, GetSignupQuery, GetSignupResult, SignupLookup};
pub use list_signups::{ListSignupsHandler, ListSignupsQuery, ListSignupsResult};
