//! Pairwise group scoring and holistic full-string scoring

use serde::{Deserialize, Serialize};

use super::{extract_groups, AddressGroups, Category, Permutation, ScoreVector};
use crate::algorithms::fuzz::{token_set_ratio, token_sort_ratio};
use crate::algorithms::normalize::clean_and_reduce;
use crate::algorithms::Metric;

/// Score when a category is empty on both sides: neutral but non-zero.
pub const BOTH_EMPTY_SCORE: f64 = 0.01;

/// Score when a category is present on exactly one side.
pub const ONE_EMPTY_SCORE: f64 = 0.0;

/// Score one category's pair of segments.
///
/// Segments are reduced with [`clean_and_reduce`] first, then the empty rules
/// apply, and only a pair that is non-empty on both sides reaches `metric`.
#[must_use]
pub fn score_category(a: &str, b: &str, category: Category, metric: Metric) -> f64 {
    let a = clean_and_reduce(a, category);
    let b = clean_and_reduce(b, category);
    match (a.is_empty(), b.is_empty()) {
        (true, true) => BOTH_EMPTY_SCORE,
        (false, false) => f64::from(metric.score(&a, &b)),
        _ => ONE_EMPTY_SCORE,
    }
}

/// Score two already-extracted group mappings field by field.
///
/// # Examples
/// ```
/// use fuzzyaddr::address::{score_groups, AddressGroups};
/// use fuzzyaddr::algorithms::Metric;
///
/// let a = AddressGroups { province: "HO CHI MINH".into(), ..Default::default() };
/// let b = AddressGroups { province: "TP HO CHI MINH".into(), ward: "BEN NGHE".into(), ..Default::default() };
/// let scores = score_groups(&a, &b, Metric::PartialRatio);
/// assert_eq!(scores.province, 100.0);
/// assert_eq!(scores.ward, 0.0);
/// assert_eq!(scores.street, 0.01);
/// ```
#[must_use]
pub fn score_groups(a: &AddressGroups, b: &AddressGroups, metric: Metric) -> ScoreVector {
    ScoreVector::from_fn(|c| score_category(a.get(c), b.get(c), c, metric))
}

/// Extract both strings under their positional hypotheses, then score.
#[must_use]
pub fn score_strings(
    a: &str,
    b: &str,
    order_a: &Permutation,
    order_b: &Permutation,
    metric: Metric,
) -> ScoreVector {
    score_groups(&extract_groups(a, order_a), &extract_groups(b, order_b), metric)
}

/// Holistic similarity of two whole addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FullStringScores {
    /// Order-insensitive similarity (token sort)
    pub normal_ratio: f64,
    /// Subset-tolerant similarity (token set)
    pub partial_ratio: f64,
}

impl FullStringScores {
    /// Same value for both ratios.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            normal_ratio: value,
            partial_ratio: value,
        }
    }
}

/// Compare two whole addresses; both ratios are 0 if either side is empty.
///
/// # Examples
/// ```
/// use fuzzyaddr::address::full_string_scores;
///
/// let scores = full_string_scores("BEN THANH,HO CHI MINH", "HO CHI MINH BEN THANH");
/// assert_eq!(scores.normal_ratio, 100.0);
/// assert_eq!(full_string_scores("", "HUE").partial_ratio, 0.0);
/// ```
#[must_use]
pub fn full_string_scores(a: &str, b: &str) -> FullStringScores {
    if a.is_empty() || b.is_empty() {
        return FullStringScores::default();
    }
    FullStringScores {
        normal_ratio: f64::from(token_sort_ratio(a, b)),
        partial_ratio: f64::from(token_set_ratio(a, b)),
    }
}
