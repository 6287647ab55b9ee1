//! Analytics handlers.
//!
//! ## Queries
//! - Get waitlist statistics (funnel, ages, popular features)

mod get_waitlist_stats;

pub use get_waitlist_stats::{GetWaitlistStatsHandler, GetWaitlistStatsQuery, GetWaitlistStatsResult};
