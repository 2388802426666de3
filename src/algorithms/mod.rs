//! String similarity primitives and address normalization
//!
//! Each primitive is a standalone function for composability; [`Metric`]
//! selects one of them by value so the choice can live in configuration.

pub mod fuzz;
pub mod levenshtein;
pub mod normalize;

pub use fuzz::{partial_ratio, ratio, token_set_ratio, token_sort_ratio};
pub use normalize::{clean_and_reduce, clean_upper_delimited, estimate_group_count};

use serde::{Deserialize, Serialize};

/// Similarity primitive selection.
///
/// - **Ratio**: whole-string edit similarity. Strict about extra words.
/// - **PartialRatio**: best substring window. Tolerates a segment that
///   carries extra detail around the name ("PHUONG BEN NGHE" vs "BEN NGHE").
/// - **TokenSortRatio**: word-order-insensitive.
/// - **TokenSetRatio**: word-order-insensitive and tolerant of extra words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Ratio,
    #[default]
    PartialRatio,
    TokenSortRatio,
    TokenSetRatio,
}

impl Metric {
    /// Similarity of `a` and `b` on the 0..=100 scale.
    #[must_use]
    pub fn score(self, a: &str, b: &str) -> u8 {
        match self {
            Metric::Ratio => ratio(a, b),
            Metric::PartialRatio => partial_ratio(a, b),
            Metric::TokenSortRatio => token_sort_ratio(a, b),
            Metric::TokenSetRatio => token_set_ratio(a, b),
        }
    }

    /// Name of the primitive for debugging/logging
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::Ratio => "ratio",
            Metric::PartialRatio => "partial_ratio",
            Metric::TokenSortRatio => "token_sort_ratio",
            Metric::TokenSetRatio => "token_set_ratio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_dispatch() {
        assert_eq!(Metric::PartialRatio.score("BEN NGHE", "PHUONG BEN NGHE"), 100);
        assert!(Metric::Ratio.score("BEN NGHE", "PHUONG BEN NGHE") < 100);
        assert_eq!(Metric::TokenSortRatio.score("A B", "B A"), 100);
        assert_eq!(Metric::default(), Metric::PartialRatio);
        assert_eq!(Metric::TokenSetRatio.name(), "token_set_ratio");
    }
}
