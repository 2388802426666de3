//! The public entry point: compare two free-text addresses.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::address::{
    full_string_scores, score_groups, score_strings, AddressGroups, FullStringScores, Permutation,
    ScoreVector,
};
use crate::alignment::{Aligner, AlignmentResult, CleanedAddress};
use crate::config::{ComparerConfig, ConfigError};
use crate::mapper::{CanonicalMapper, Gazetteer};
use crate::report::{Assembler, ComparisonResult};

/// Batches at least this large are compared in parallel.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Compares addresses under a fixed configuration and canonical mapper.
///
/// # Examples
///
/// ```
/// use fuzzyaddr::{AddressComparer, Gazetteer};
///
/// let gazetteer = Gazetteer::builder()
///     .ward("Ho Chi Minh", "Quan 1", "Ben Thanh")
///     .build();
/// let comparer = AddressComparer::new(gazetteer);
///
/// let result = comparer
///     .compare(
///         "12 Le Loi, P. Ben Thanh, Quan 1, TP Ho Chi Minh",
///         "Ho Chi Minh, Quan 1, Ben Thanh, 12 Le Loi",
///     )
///     .unwrap();
/// assert_eq!(result.scores().province, 100.0);
/// assert_eq!(result.label, "full_full");
/// ```
#[derive(Debug, Clone)]
pub struct AddressComparer<M = Gazetteer> {
    aligner: Aligner,
    mapper: M,
}

impl<M: CanonicalMapper> AddressComparer<M> {
    /// Comparer with the default configuration.
    pub fn new(mapper: M) -> Self {
        Self {
            aligner: Aligner::default(),
            mapper,
        }
    }

    /// Comparer with a custom configuration, validated first.
    pub fn with_config(mapper: M, config: ComparerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            aligner: Aligner::new(config),
            mapper,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ComparerConfig {
        self.aligner.config()
    }

    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Compare two addresses.
    ///
    /// Returns `None` when either side has no segments after cleaning.
    #[instrument(level = "debug", skip(self))]
    pub fn compare(&self, first: &str, second: &str) -> Option<ComparisonResult> {
        let first = CleanedAddress::new(first);
        let second = CleanedAddress::new(second);
        if first.group_count() == 0 || second.group_count() == 0 {
            debug!("empty address, nothing to compare");
            return None;
        }

        let alignment = self.aligner.align(&first, &second);
        let result = Assembler::new(self.config(), &self.mapper).assemble(&first, &second, alignment);
        debug!(label = %result.label, aligned = result.alignment.is_aligned(), "compared");
        Some(result)
    }

    /// Alignment search alone, on already-cleaned addresses.
    #[must_use]
    pub fn align(&self, first: &CleanedAddress, second: &CleanedAddress) -> AlignmentResult {
        self.aligner.align(first, second)
    }

    /// Score two group mappings with the configured metric.
    #[must_use]
    pub fn score_groups(&self, first: &AddressGroups, second: &AddressGroups) -> ScoreVector {
        score_groups(first, second, self.config().group_metric)
    }

    /// Extract and score two strings under the given orders.
    #[must_use]
    pub fn score_strings(
        &self,
        first: &str,
        second: &str,
        first_order: &Permutation,
        second_order: &Permutation,
    ) -> ScoreVector {
        score_strings(first, second, first_order, second_order, self.config().group_metric)
    }

    /// Holistic similarity of two whole strings.
    #[must_use]
    pub fn full_string_scores(&self, first: &str, second: &str) -> FullStringScores {
        full_string_scores(first, second)
    }

    /// Compare each pair; element `i` equals `compare(pairs[i].0, pairs[i].1)`.
    pub fn compare_many<A, B>(&self, pairs: &[(A, B)]) -> Vec<Option<ComparisonResult>>
    where
        A: AsRef<str> + Sync,
        B: AsRef<str> + Sync,
    {
        let compare = |(a, b): &(A, B)| self.compare(a.as_ref(), b.as_ref());
        if pairs.len() >= PARALLEL_THRESHOLD {
            debug!(pairs = pairs.len(), "comparing batch in parallel");
            pairs.par_iter().map(compare).collect()
        } else {
            pairs.iter().map(compare).collect()
        }
    }
}

impl Default for AddressComparer<Gazetteer> {
    fn default() -> Self {
        Self::new(Gazetteer::default())
    }
}
