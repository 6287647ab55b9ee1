//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `waitlist` - Signup funnel: signups, child profiles, the joined view
//! - `analytics` - Pure statistics over the signup snapshot

pub mod analytics;
pub mod foundation;
pub mod waitlist;
