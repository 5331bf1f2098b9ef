//! Vote tally aggregation.

use std::collections::HashMap;

use crate::domain::entities::{OptionId, VoteRecord};

/// Per-option vote counts. Only options with at least one vote appear;
/// callers that want zero rows for unvoted options seed them from the
/// option list when rendering.
pub type Tally = HashMap<OptionId, u64>;

/// Per-option share of the total vote, in percent.
pub type PercentageTally = HashMap<OptionId, f64>;

/// Aggregated result for one poll, recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TallyResult {
    pub counts: Tally,
    pub percentages: PercentageTally,
    pub total_votes: u64,
}

impl TallyResult {
    /// Returns the vote count for an option, 0 when it received none.
    #[must_use]
    pub fn count_for(&self, option_id: OptionId) -> u64 {
        self.counts.get(&option_id).copied().unwrap_or(0)
    }

    /// Returns the percentage for an option, 0.0 when it received none.
    #[must_use]
    pub fn percentage_for(&self, option_id: OptionId) -> f64 {
        self.percentages.get(&option_id).copied().unwrap_or(0.0)
    }
}

/// Reduces a list of vote records into counts and relative percentages.
///
/// Pure and total: the same multiset of votes always produces the same
/// result, and input order never matters. Percentages are rounded to two
/// decimal places. With no votes at all both maps are empty and
/// `total_votes` is 0; no division happens, so callers never see NaN.
#[must_use]
pub fn aggregate(votes: &[VoteRecord]) -> TallyResult {
    let total_votes = votes.len() as u64;

    let mut counts = Tally::new();
    for vote in votes {
        *counts.entry(vote.option_id).or_insert(0) += 1;
    }

    let percentages = if total_votes == 0 {
        PercentageTally::new()
    } else {
        counts
            .iter()
            .map(|(&option_id, &count)| {
                let share = count as f64 / total_votes as f64 * 100.0;
                (option_id, round_percent(share))
            })
            .collect()
    };

    TallyResult {
        counts,
        percentages,
        total_votes,
    }
}

fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn votes(option_ids: &[i64]) -> Vec<VoteRecord> {
        option_ids
            .iter()
            .map(|&id| VoteRecord::new(OptionId(id)))
            .collect()
    }

    #[test]
    fn test_empty_votes_yield_empty_result() {
        let result = aggregate(&[]);

        assert_eq!(result.total_votes, 0);
        assert!(result.counts.is_empty());
        assert!(result.percentages.is_empty());
        assert_eq!(result.percentage_for(OptionId(1)), 0.0);
        assert!(result.percentages.values().all(|p| p.is_finite()));
    }

    #[test]
    fn test_counts_and_percentages() {
        let result = aggregate(&votes(&[1, 1, 2]));

        assert_eq!(result.total_votes, 3);
        assert_eq!(result.count_for(OptionId(1)), 2);
        assert_eq!(result.count_for(OptionId(2)), 1);
        assert_eq!(result.percentage_for(OptionId(1)), 66.67);
        assert_eq!(result.percentage_for(OptionId(2)), 33.33);
    }

    #[test]
    fn test_unvoted_option_is_absent() {
        let result = aggregate(&votes(&[5, 5]));

        assert!(!result.counts.contains_key(&OptionId(6)));
        assert_eq!(result.count_for(OptionId(6)), 0);
        assert_eq!(result.percentage_for(OptionId(5)), 100.0);
    }

    #[test_case(&[1, 1, 2, 3, 2, 1]; "interleaved")]
    #[test_case(&[1, 1, 1, 2, 2, 3]; "grouped")]
    #[test_case(&[3, 2, 2, 1, 1, 1]; "reversed")]
    fn test_order_independence(order: &[i64]) {
        let baseline = aggregate(&votes(&[1, 1, 1, 2, 2, 3]));
        let permuted = aggregate(&votes(order));

        assert_eq!(permuted.counts, baseline.counts);
        assert_eq!(permuted.percentages, baseline.percentages);
        assert_eq!(permuted.total_votes, baseline.total_votes);
    }

    #[test]
    fn test_percentages_sum_close_to_hundred() {
        let result = aggregate(&votes(&[1, 2, 3]));

        let sum: f64 = result.percentages.values().sum();
        assert!((sum - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_rounding_is_two_decimals() {
        // 1/7 of the vote is 14.2857...% and must come back as 14.29.
        let result = aggregate(&votes(&[1, 2, 2, 2, 2, 2, 2]));
        assert_eq!(result.percentage_for(OptionId(1)), 14.29);
    }
}
