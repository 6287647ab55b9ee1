//! Analytics module - pure aggregation over the signup snapshot.

mod stats;

pub use stats::{AgeCount, FeatureCount, WaitlistStats, TOP_FEATURE_LIMIT};
