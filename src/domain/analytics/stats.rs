//! Waitlist statistics computed from a snapshot of `CompleteSignup` rows.
//!
//! The computation holds no state between calls: the same snapshot always
//! yields the same statistics, so it can be recomputed on every request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;
use crate::domain::waitlist::CompleteSignup;

/// How many features the popularity ranking keeps.
pub const TOP_FEATURE_LIMIT: usize = 5;

/// Popularity of one feature label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCount {
    pub feature: String,
    pub count: usize,
}

/// Number of children of a given age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCount {
    pub age: u8,
    pub count: usize,
}

/// Summary of the waitlist for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistStats {
    pub total_signups: usize,
    pub completed_signups: usize,
    pub conversion_rate: Percentage,
    /// Mean child age, one decimal place.
    pub average_age: f64,
    /// Most requested features, count descending then label ascending.
    pub top_features: Vec<FeatureCount>,
    /// Children per age, ascending by age.
    pub age_distribution: Vec<AgeCount>,
}

impl WaitlistStats {
    /// Aggregates `signups` into dashboard statistics.
    pub fn compute(signups: &[CompleteSignup]) -> Self {
        let total_signups = signups.len();
        let completed_signups = signups.iter().filter(|s| s.is_completed()).count();

        let mut age_counts: BTreeMap<u8, usize> = BTreeMap::new();
        let mut age_sum: u64 = 0;
        for age in signups.iter().filter_map(|s| s.child_age) {
            *age_counts.entry(age.value()).or_default() += 1;
            age_sum += u64::from(age.value());
        }
        let aged: usize = age_counts.values().sum();

        let mut feature_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for feature in signups.iter().flat_map(|s| s.selected_features.iter()) {
            *feature_counts.entry(feature.as_str()).or_default() += 1;
        }

        Self {
            total_signups,
            completed_signups,
            conversion_rate: Percentage::of(completed_signups, total_signups),
            average_age: one_decimal_mean(age_sum, aged),
            top_features: rank_features(feature_counts),
            age_distribution: age_counts
                .into_iter()
                .map(|(age, count)| AgeCount { age, count })
                .collect(),
        }
    }

    /// Statistics of an empty waitlist.
    pub fn empty() -> Self {
        Self::compute(&[])
    }
}

fn one_decimal_mean(sum: u64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (sum as f64 / n as f64 * 10.0).round() / 10.0
}

fn rank_features(counts: BTreeMap<&str, usize>) -> Vec<FeatureCount> {
    let mut ranked: Vec<FeatureCount> = counts
        .into_iter()
        .map(|(feature, count)| FeatureCount {
            feature: feature.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.feature.cmp(&b.feature)));
    ranked.truncate(TOP_FEATURE_LIMIT);
    ranked
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
