//! KaiD Waitlist - two-step signup funnel for the KaiD launch page.
//!
//! Parents leave their name and email (step 1), then describe their child
//! and the features they care about (step 2). Signups are deduplicated by
//! email, and an admin surface reads, exports and aggregates them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
