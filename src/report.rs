//! Result assembly: alignment, canonical mapping and holistic scores
//! merged into one report of fixed shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::address::{
    extract_groups, full_string_scores, inject_all, score_groups, to_canonical_string,
    FullStringScores, Permutation, ScoreVector, BOTH_EMPTY_SCORE,
};
use crate::alignment::{AlignmentResult, CleanedAddress, Regime};
use crate::config::ComparerConfig;
use crate::mapper::{CanonicalMapper, MappedAddress};

/// Full comparison report for a pair of addresses.
///
/// Every path through the comparer produces the same fields; fallbacks are
/// expressed through values (sentinel records, 0.01 and 0.1 scores), never
/// through missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// First address after [`clean_upper_delimited`](crate::algorithms::clean_upper_delimited)
    pub cleaned_first: String,
    /// Second address after cleaning
    pub cleaned_second: String,
    /// Winning positional hypotheses and their per-category scores
    pub alignment: AlignmentResult,
    /// Holistic similarity of the cleaned inputs
    pub raw_ratios: FullStringScores,
    /// Canonical record for the first address
    pub canonical_first: MappedAddress,
    /// Canonical record for the second address
    pub canonical_second: MappedAddress,
    /// Per-category similarity of the canonical records
    pub canonical_scores: ScoreVector,
    /// Holistic similarity of the canonical records
    pub canonical_ratios: FullStringScores,
    /// `"{first kind}_{second kind}"`
    pub label: String,
}

impl ComparisonResult {
    /// Per-category scores of the winning alignment.
    #[must_use]
    pub fn scores(&self) -> &ScoreVector {
        &self.alignment.scores
    }
}

/// Lay `address` out as `street,ward,district,province` for the mapper.
///
/// Under [`Regime::Single`] the text is copied into every slot whether or not
/// it aligned. Otherwise an aligned address is re-extracted from its cleaned
/// text under its winning order, and an unaligned one passes through
/// unchanged.
#[must_use]
pub fn rewrite_canonical(
    address: &CleanedAddress,
    regime: Regime,
    order: Option<&Permutation>,
) -> String {
    if regime == Regime::Single {
        return inject_all(address.text());
    }
    match order {
        Some(order) => to_canonical_string(&extract_groups(address.text(), order)),
        None => address.text().to_owned(),
    }
}

/// Merges alignment output with canonical mapping into a [`ComparisonResult`].
pub struct Assembler<'a, M: ?Sized> {
    config: &'a ComparerConfig,
    mapper: &'a M,
}

impl<'a, M: CanonicalMapper + ?Sized> Assembler<'a, M> {
    pub fn new(config: &'a ComparerConfig, mapper: &'a M) -> Self {
        Self { config, mapper }
    }

    /// Resolve a rewritten address, or substitute the short-address sentinel.
    fn map(&self, rewritten: &str) -> MappedAddress {
        if rewritten.chars().count() <= self.config.mapper_min_len {
            debug!(rewritten, "address too short to map");
            return MappedAddress::short_address();
        }
        self.mapper
            .resolve(rewritten, self.config.mapper_leniency)
            .unwrap_or_else(|| {
                debug!(rewritten, "mapper could not resolve address");
                MappedAddress::short_address()
            })
    }

    pub fn assemble(
        &self,
        first: &CleanedAddress,
        second: &CleanedAddress,
        alignment: AlignmentResult,
    ) -> ComparisonResult {
        let regime = alignment.regime;
        let canonical_first =
            self.map(&rewrite_canonical(first, regime, alignment.first.as_ref()));
        let canonical_second =
            self.map(&rewrite_canonical(second, regime, alignment.second.as_ref()));

        let canonical_scores = score_groups(
            &canonical_first.groups(),
            &canonical_second.groups(),
            self.config.group_metric,
        );
        let canonical_ratios =
            if canonical_first.is_short_address() || canonical_second.is_short_address() {
                FullStringScores::uniform(BOTH_EMPTY_SCORE)
            } else {
                full_string_scores(&canonical_first.joined(), &canonical_second.joined())
            };
        let label = format!("{}_{}", canonical_first.kind, canonical_second.kind);

        ComparisonResult {
            cleaned_first: first.text().to_owned(),
            cleaned_second: second.text().to_owned(),
            raw_ratios: full_string_scores(first.text(), second.text()),
            alignment,
            canonical_first,
            canonical_second,
            canonical_scores,
            canonical_ratios,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Category;
    use crate::alignment::{Aligner, Side};
    use crate::mapper::Gazetteer;

    struct Unresolvable;

    impl CanonicalMapper for Unresolvable {
        fn resolve(&self, _address: &str, _leniency: u8) -> Option<MappedAddress> {
            None
        }
    }

    const INJECT_FIRST: Regime = Regime::InjectAll { blob: Side::First };

    #[test]
    fn test_rewrite_single_regime_injects() {
        let address = CleanedAddress::new("Ho Chi Minh");
        assert_eq!(
            rewrite_canonical(&address, Regime::Single, Some(&Permutation::SINGLE_SEGMENT)),
            "HO CHI MINH,HO CHI MINH,HO CHI MINH,HO CHI MINH"
        );
        assert_eq!(
            rewrite_canonical(&address, Regime::Single, None),
            "HO CHI MINH,HO CHI MINH,HO CHI MINH,HO CHI MINH"
        );
    }

    #[test]
    fn test_rewrite_aligned_blob_uses_its_own_text() {
        let address = CleanedAddress::new("Hanoi");
        assert_eq!(
            rewrite_canonical(&address, INJECT_FIRST, Some(&Permutation::INJECT_ALL)),
            "HANOI,,,"
        );
    }

    #[test]
    fn test_rewrite_unaligned_blob_passes_through() {
        let address = CleanedAddress::new("Hanoi");
        assert_eq!(rewrite_canonical(&address, INJECT_FIRST, None), "HANOI");
    }

    #[test]
    fn test_rewrite_aligned_reorders() {
        let address = CleanedAddress::new("Ho Chi Minh, Quan 1, Ben Thanh, 12 Le Loi");
        let reversed = Permutation::new([
            Category::Province,
            Category::District,
            Category::Ward,
            Category::Street,
        ])
        .unwrap();
        assert_eq!(
            rewrite_canonical(&address, Regime::Full, Some(&reversed)),
            "12 LE LOI,BEN THANH,QUAN 1,HO CHI MINH"
        );
    }

    #[test]
    fn test_rewrite_keeps_empty_slots() {
        let address = CleanedAddress::new("Quan 1, Ho Chi Minh");
        let order = Permutation::new([
            Category::District,
            Category::Province,
            Category::Street,
            Category::Ward,
        ])
        .unwrap();
        assert_eq!(rewrite_canonical(&address, Regime::Full, Some(&order)), ",,QUAN 1,HO CHI MINH");
    }

    #[test]
    fn test_rewrite_unaligned_passes_through() {
        let address = CleanedAddress::new("a, b, c");
        assert_eq!(rewrite_canonical(&address, Regime::Full, None), "A,B,C");
    }

    #[test]
    fn test_unresolved_mapper_yields_sentinels() {
        let config = ComparerConfig::default();
        let first = CleanedAddress::new("12 Le Loi, Ben Thanh, Quan 1, Ho Chi Minh");
        let second = first.clone();
        let alignment = Aligner::default().align(&first, &second);
        let result = Assembler::new(&config, &Unresolvable).assemble(&first, &second, alignment);

        assert!(result.canonical_first.is_short_address());
        assert!(result.canonical_second.is_short_address());
        assert_eq!(result.label, "short_address_short_address");
        assert_eq!(result.canonical_ratios, FullStringScores::uniform(0.01));
        assert_eq!(result.canonical_scores, ScoreVector::uniform(0.01));
        assert_eq!(result.raw_ratios, FullStringScores::uniform(100.0));
    }

    #[test]
    fn test_short_rewrite_skips_mapper() {
        let config = ComparerConfig::default();
        let gazetteer = Gazetteer::builder().province("Hue").build();
        let first = CleanedAddress::new("Hue, VN");
        let second = CleanedAddress::new("Hue, VN");
        let alignment = Aligner::default().align(&first, &second);
        let result = Assembler::new(&config, &gazetteer).assemble(&first, &second, alignment);
        assert_eq!(result.canonical_first, MappedAddress::short_address());
        assert_eq!(result.canonical_second.count, 0);
    }

    #[test]
    fn test_mapped_records_are_scored() {
        let config = ComparerConfig::default();
        let gazetteer = Gazetteer::builder()
            .ward("Ho Chi Minh", "Quan 1", "Ben Thanh")
            .build();
        let first = CleanedAddress::new("12 Le Loi, Ben Thanh, Quan 1, Ho Chi Minh");
        let second = CleanedAddress::new("Ho Chi Minh, Quan 1, P. Ben Thanh, so 12 Le Loi");
        let alignment = Aligner::default().align(&first, &second);
        let result = Assembler::new(&config, &gazetteer).assemble(&first, &second, alignment);

        assert_eq!(result.label, "full_full");
        assert_eq!(result.canonical_scores, ScoreVector::uniform(100.0));
        assert_eq!(result.canonical_ratios.partial_ratio, 100.0);
    }
}
