#[cfg(test)]
mod tests {
    use crate::domain::analytics::stats::{AgeCount, FeatureCount, WaitlistStats};
    use crate::domain::waitlist::complete_signup::fixtures::{completed, partial};
    use crate::domain::waitlist::CompleteSignup;

    fn partials(n: usize) -> Vec<CompleteSignup> {
        (0..n)
            .map(|i| partial(&format!("partial{i}@example.com")))
            .collect()
    }

    #[test]
    fn test_empty_snapshot_yields_zeroes() {
        let stats = WaitlistStats::compute(&[]);

        assert_eq!(stats.total_signups, 0);
        assert_eq!(stats.completed_signups, 0);
        assert_eq!(stats.conversion_rate.value(), 0);
        assert_eq!(stats.average_age, 0.0);
        assert!(stats.top_features.is_empty());
        assert!(stats.age_distribution.is_empty());
        assert_eq!(stats, WaitlistStats::empty());
    }

    #[test]
    fn test_average_age_and_distribution() {
        let rows = vec![
            completed("a@example.com", 5, &[]),
            completed("b@example.com", 5, &[]),
            completed("c@example.com", 7, &[]),
            completed("d@example.com", 9, &[]),
        ];

        let stats = WaitlistStats::compute(&rows);

        assert_eq!(stats.average_age, 6.5);
        assert_eq!(
            stats.age_distribution,
            vec![
                AgeCount { age: 5, count: 2 },
                AgeCount { age: 7, count: 1 },
                AgeCount { age: 9, count: 1 },
            ]
        );
    }

    #[test]
    fn test_average_age_rounds_to_one_decimal() {
        let rows = vec![
            completed("a@example.com", 1, &[]),
            completed("b@example.com", 2, &[]),
            completed("c@example.com", 2, &[]),
        ];

        assert_eq!(WaitlistStats::compute(&rows).average_age, 1.7);
    }

    #[test]
    fn test_ages_only_counted_when_present() {
        let mut rows = partials(3);
        rows.push(completed("a@example.com", 4, &[]));

        let stats = WaitlistStats::compute(&rows);

        assert_eq!(stats.average_age, 4.0);
        assert_eq!(stats.age_distribution, vec![AgeCount { age: 4, count: 1 }]);
    }

    #[test]
    fn test_conversion_rate_is_rounded_percentage() {
        let mut rows = partials(6);
        for i in 0..4 {
            rows.push(completed(&format!("done{i}@example.com"), 3, &[]));
        }

        let stats = WaitlistStats::compute(&rows);

        assert_eq!(stats.total_signups, 10);
        assert_eq!(stats.completed_signups, 4);
        assert_eq!(stats.conversion_rate.value(), 40);
    }

    #[test]
    fn test_top_features_ranked_by_count() {
        let rows = vec![
            completed("a@example.com", 5, &["Art", "Music"]),
            completed("b@example.com", 6, &["Art"]),
        ];

        let stats = WaitlistStats::compute(&rows);

        assert_eq!(
            stats.top_features,
            vec![
                FeatureCount { feature: "Art".to_string(), count: 2 },
                FeatureCount { feature: "Music".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_features_ties_broken_by_label_and_truncated() {
        let rows = vec![completed(
            "a@example.com",
            5,
            &["Stories", "Art", "Music", "Games", "Coding", "Bedtime"],
        )];

        let stats = WaitlistStats::compute(&rows);
        let labels: Vec<&str> = stats.top_features.iter().map(|f| f.feature.as_str()).collect();

        assert_eq!(labels, vec!["Art", "Bedtime", "Coding", "Games", "Music"]);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let rows = vec![
            completed("a@example.com", 5, &["Art"]),
            partial("b@example.com"),
            completed("c@example.com", 11, &["Music", "Art"]),
        ];

        assert_eq!(WaitlistStats::compute(&rows), WaitlistStats::compute(&rows));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(WaitlistStats::empty()).unwrap();

        assert_eq!(json["totalSignups"], 0);
        assert_eq!(json["conversionRate"], 0);
        assert_eq!(json["averageAge"], 0.0);
        assert!(json["topFeatures"].as_array().unwrap().is_empty());
        assert!(json["ageDistribution"].as_array().unwrap().is_empty());
    }
}
