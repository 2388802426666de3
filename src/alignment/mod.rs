//! Alignment search: which segment of each address means which category
//!
//! The category of each comma segment is not given, so the engine tries
//! positional hypotheses and keeps the most credible one. How many
//! hypotheses it tries depends on how many segments each side exhibits:
//!
//! - **Single** (1 vs 1): every order reads the same text, so both sides are
//!   extracted once under [`Permutation::SINGLE_SEGMENT`].
//! - **InjectAll** (1 vs N): the lone segment is copied into all four slots
//!   and only the other side's 24 orderings are searched.
//! - **Full** (N vs N): all 24 × 24 ordering pairs are scored.
//! - **Empty**: one side has no segments at all; nothing is attempted.
//!
//! Candidates are ranked by [`selection::Selector`].

pub mod selection;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::{
    extract_groups, inject_all, score_groups, AddressGroups, Permutation, PermutationCatalog,
    ScoreVector,
};
use crate::algorithms::normalize::{clean_upper_delimited, estimate_group_count};
use crate::config::ComparerConfig;
use selection::{Selected, Selector};

/// Uniform score reported for every category when no candidate is credible.
///
/// Distinct from 0 ("structurally absent") and 0.01 ("both empty").
pub const UNALIGNED_SCORE: f64 = 0.1;

/// One of the two addresses being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

/// Search strategy, chosen from the two sides' group counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Regime {
    /// At least one side has zero groups
    Empty,
    /// One segment on each side
    Single,
    /// One segment on `blob`, several on the other side
    InjectAll { blob: Side },
    /// Several segments on both sides
    Full,
}

impl Regime {
    /// Pick the regime for two group counts (each 0..=4).
    #[must_use]
    pub fn select(first_groups: usize, second_groups: usize) -> Self {
        match (first_groups, second_groups) {
            (0, _) | (_, 0) => Regime::Empty,
            (1, 1) => Regime::Single,
            (1, _) => Regime::InjectAll { blob: Side::First },
            (_, 1) => Regime::InjectAll { blob: Side::Second },
            _ => Regime::Full,
        }
    }
}

/// A cleaned address together with its estimated group count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedAddress {
    text: String,
    group_count: usize,
}

impl CleanedAddress {
    /// Clean `raw` with [`clean_upper_delimited`] and estimate its groups.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self::from_cleaned(clean_upper_delimited(raw))
    }

    /// Wrap text that is already cleaned.
    #[must_use]
    pub fn from_cleaned(text: impl Into<String>) -> Self {
        let text = text.into();
        let group_count = estimate_group_count(&text);
        Self { text, group_count }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Length in chars.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Outcome of an alignment search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub regime: Regime,
    /// Winning order for the first address
    pub first: Option<Permutation>,
    /// Winning order for the second address
    pub second: Option<Permutation>,
    /// Per-category scores of the winning pair
    pub scores: ScoreVector,
}

impl AlignmentResult {
    /// Nothing was attempted: zero scores, no orders.
    fn unscored(regime: Regime) -> Self {
        Self {
            regime,
            first: None,
            second: None,
            scores: ScoreVector::uniform(0.0),
        }
    }

    fn unaligned(regime: Regime) -> Self {
        Self {
            regime,
            first: None,
            second: None,
            scores: ScoreVector::uniform(UNALIGNED_SCORE),
        }
    }

    /// Whether a credible pair of orders was found.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }
}

/// Alignment search engine with its fixed catalog and configuration.
#[derive(Debug, Clone)]
pub struct Aligner {
    catalog: PermutationCatalog,
    config: ComparerConfig,
}

impl Aligner {
    /// The configuration is trusted; validate it first.
    #[must_use]
    pub fn new(config: ComparerConfig) -> Self {
        Self {
            catalog: PermutationCatalog::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ComparerConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &PermutationCatalog {
        &self.catalog
    }

    /// Find the most credible pair of orders for two cleaned addresses.
    #[must_use]
    pub fn align(&self, first: &CleanedAddress, second: &CleanedAddress) -> AlignmentResult {
        let regime = Regime::select(first.group_count(), second.group_count());
        debug!(
            ?regime,
            first_groups = first.group_count(),
            second_groups = second.group_count(),
            "selected alignment regime"
        );
        match regime {
            Regime::Empty => AlignmentResult::unscored(regime),
            Regime::Single => self.align_single(first, second),
            Regime::InjectAll { blob: Side::First } => {
                self.align_inject_all(first, second, Side::First)
            }
            Regime::InjectAll { blob: Side::Second } => {
                self.align_inject_all(second, first, Side::Second)
            }
            Regime::Full => self.align_full(first, second),
        }
    }

    fn long_enough(&self, address: &CleanedAddress) -> bool {
        address.char_len() > self.config.min_segment_len
    }

    fn score(&self, a: &AddressGroups, b: &AddressGroups) -> ScoreVector {
        score_groups(a, b, self.config.group_metric)
    }

    fn too_short(regime: Regime) -> AlignmentResult {
        debug!(?regime, "single segment too short to align");
        AlignmentResult::unscored(regime)
    }

    fn no_credible_alignment(regime: Regime, evaluated: usize, gated: usize) -> AlignmentResult {
        debug!(?regime, evaluated, gated, "no credible alignment");
        AlignmentResult::unaligned(regime)
    }

    /// Winner of `selector`, or the unaligned result for `regime`.
    fn finish(regime: Regime, selector: Selector<'_>) -> Result<Selected, AlignmentResult> {
        let evaluated = selector.evaluated();
        let gated = selector.gated();
        selector
            .finish()
            .ok_or_else(|| Self::no_credible_alignment(regime, evaluated, gated))
    }

    fn align_single(&self, first: &CleanedAddress, second: &CleanedAddress) -> AlignmentResult {
        let regime = Regime::Single;
        if !self.long_enough(first) || !self.long_enough(second) {
            return Self::too_short(regime);
        }

        let order = Permutation::SINGLE_SEGMENT;
        let scores = self.score(
            &extract_groups(first.text(), &order),
            &extract_groups(second.text(), &order),
        );
        let mut selector = Selector::new(&self.config);
        selector.offer(scores);

        match Self::finish(regime, selector) {
            Ok(Selected { scores, .. }) => AlignmentResult {
                regime,
                first: Some(order),
                second: Some(order),
                scores,
            },
            Err(unaligned) => unaligned,
        }
    }

    /// `blob` is the single-segment address, found on `blob_side`.
    fn align_inject_all(
        &self,
        blob: &CleanedAddress,
        other: &CleanedAddress,
        blob_side: Side,
    ) -> AlignmentResult {
        let regime = Regime::InjectAll { blob: blob_side };
        if !self.long_enough(blob) {
            return Self::too_short(regime);
        }

        let mut selector = Selector::new(&self.config);
        let blob_groups = extract_groups(&inject_all(blob.text()), &Permutation::INJECT_ALL);
        for order in &self.catalog {
            let other_groups = extract_groups(other.text(), order);
            let scores = match blob_side {
                Side::First => self.score(&blob_groups, &other_groups),
                Side::Second => self.score(&other_groups, &blob_groups),
            };
            selector.offer(scores);
        }

        let best = match Self::finish(regime, selector) {
            Ok(best) => best,
            Err(unaligned) => return unaligned,
        };
        let other_order = self.catalog.get(best.index).copied();
        let blob_order = Some(Permutation::INJECT_ALL);
        let (first, second) = match blob_side {
            Side::First => (blob_order, other_order),
            Side::Second => (other_order, blob_order),
        };
        AlignmentResult {
            regime,
            first,
            second,
            scores: best.scores,
        }
    }

    fn align_full(&self, first: &CleanedAddress, second: &CleanedAddress) -> AlignmentResult {
        let regime = Regime::Full;
        let first_groups: Vec<AddressGroups> = self
            .catalog
            .iter()
            .map(|order| extract_groups(first.text(), order))
            .collect();
        let second_groups: Vec<AddressGroups> = self
            .catalog
            .iter()
            .map(|order| extract_groups(second.text(), order))
            .collect();

        // index = outer * catalog.len() + inner
        let mut selector = Selector::new(&self.config);
        for a in &first_groups {
            for b in &second_groups {
                selector.offer(self.score(a, b));
            }
        }

        let best = match Self::finish(regime, selector) {
            Ok(best) => best,
            Err(unaligned) => return unaligned,
        };
        let width = self.catalog.len();
        AlignmentResult {
            regime,
            first: self.catalog.get(best.index / width).copied(),
            second: self.catalog.get(best.index % width).copied(),
            scores: best.scores,
        }
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new(ComparerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Category;

    fn cleaned(s: &str) -> CleanedAddress {
        CleanedAddress::new(s)
    }

    #[test]
    fn test_regime_selection() {
        assert_eq!(Regime::select(0, 3), Regime::Empty);
        assert_eq!(Regime::select(2, 0), Regime::Empty);
        assert_eq!(Regime::select(1, 1), Regime::Single);
        assert_eq!(Regime::select(1, 4), Regime::InjectAll { blob: Side::First });
        assert_eq!(Regime::select(3, 1), Regime::InjectAll { blob: Side::Second });
        assert_eq!(Regime::select(2, 4), Regime::Full);
    }

    #[test]
    fn test_identical_full_addresses_align_canonically() {
        let aligner = Aligner::default();
        let a = cleaned("12 Le Loi, Ben Thanh, Quan 1, Ho Chi Minh");
        let result = aligner.align(&a, &a.clone());
        assert_eq!(result.regime, Regime::Full);
        assert_eq!(result.first, Some(Permutation::CANONICAL));
        assert_eq!(result.second, Some(Permutation::CANONICAL));
        assert_eq!(result.scores, ScoreVector::uniform(100.0));
    }

    #[test]
    fn test_reordered_address_is_recovered() {
        let aligner = Aligner::default();
        let a = cleaned("12 Le Loi, Ben Thanh, Quan 1, Ho Chi Minh");
        let b = cleaned("Ho Chi Minh, Quan 1, Ben Thanh, 12 Le Loi");
        let result = aligner.align(&a, &b);
        assert!(result.is_aligned());
        assert_eq!(result.scores, ScoreVector::uniform(100.0));
        // Whatever order wins, side 1's province slot must hold side 2's province text
        let first = result.first.unwrap();
        let second = result.second.unwrap();
        let g1 = extract_groups(a.text(), &first);
        let g2 = extract_groups(b.text(), &second);
        assert_eq!(g1.province, g2.province);
    }

    #[test]
    fn test_inject_all_regime() {
        let aligner = Aligner::default();
        let a = cleaned("Ho Chi Minh");
        let b = cleaned("1 Nguyen Hue, Ben Nghe, Quan 1, Ho Chi Minh");
        let result = aligner.align(&a, &b);
        assert_eq!(result.regime, Regime::InjectAll { blob: Side::First });
        assert_eq!(result.first, Some(Permutation::INJECT_ALL));
        let second = result.second.unwrap();
        assert_eq!(extract_groups(b.text(), &second).province, "HO CHI MINH");
        assert_eq!(result.scores.province, 100.0);
        for c in [Category::Street, Category::Ward, Category::District] {
            assert!(*result.scores.get(c) < 100.0, "{c} should not match the blob fully");
        }
    }

    #[test]
    fn test_inject_all_on_second_side() {
        let aligner = Aligner::default();
        let a = cleaned("1 Nguyen Hue, Ben Nghe, Quan 1, Ho Chi Minh");
        let b = cleaned("Ho Chi Minh");
        let result = aligner.align(&a, &b);
        assert_eq!(result.regime, Regime::InjectAll { blob: Side::Second });
        assert_eq!(result.second, Some(Permutation::INJECT_ALL));
        let first = result.first.unwrap();
        assert_eq!(extract_groups(a.text(), &first).province, "HO CHI MINH");
    }

    #[test]
    fn test_single_regime_uses_fixed_order() {
        let aligner = Aligner::default();
        let result = aligner.align(&cleaned("Ho Chi Minh"), &cleaned("TP Ho Chi Minh"));
        assert_eq!(result.regime, Regime::Single);
        assert_eq!(result.first, Some(Permutation::SINGLE_SEGMENT));
        assert_eq!(result.second, Some(Permutation::SINGLE_SEGMENT));
        assert_eq!(result.scores.province, 100.0);
        assert_eq!(result.scores.street, 0.01);
    }

    #[test]
    fn test_single_regime_too_short() {
        let aligner = Aligner::default();
        let result = aligner.align(&cleaned("Hue"), &cleaned("Hue"));
        assert_eq!(result.regime, Regime::Single);
        assert!(!result.is_aligned());
        assert_eq!(result.scores, ScoreVector::uniform(0.0));
    }

    #[test]
    fn test_inject_all_too_short_blob_is_unscored() {
        let aligner = Aligner::default();
        let result = aligner.align(&cleaned("1 Nguyen Hue, Ben Nghe, Hue"), &cleaned("Hue"));
        assert_eq!(result.regime, Regime::InjectAll { blob: Side::Second });
        assert_eq!(result.first, None);
        assert_eq!(result.second, None);
        assert_eq!(result.scores, ScoreVector::uniform(0.0));
    }

    #[test]
    fn test_disjoint_addresses_fail_gate() {
        let aligner = Aligner::default();
        let result = aligner.align(&cleaned("AAAA, BBBB"), &cleaned("XXXX, YYYY, ZZZZ"));
        assert_eq!(result.regime, Regime::Full);
        assert_eq!(result.first, None);
        assert_eq!(result.second, None);
        assert_eq!(result.scores, ScoreVector::uniform(UNALIGNED_SCORE));
    }

    #[test]
    fn test_empty_side_is_degenerate() {
        let aligner = Aligner::default();
        let result = aligner.align(&cleaned(""), &cleaned("Ho Chi Minh"));
        assert_eq!(result.regime, Regime::Empty);
        assert!(!result.is_aligned());
        assert_eq!(result.scores, ScoreVector::uniform(0.0));
    }

    #[test]
    fn test_alignment_is_deterministic() {
        let aligner = Aligner::default();
        let a = cleaned("Ben Thanh, 12 Le Loi, Ho Chi Minh");
        let b = cleaned("Quan 1, Ho Chi Minh, Ben Thanh");
        assert_eq!(aligner.align(&a, &b), aligner.align(&a, &b));
    }
}
